// src/noyau/analyse.rs
//
// Analyse : jetons bruts -> pile infixe prête pour le shunting-yard.
// - espaces retirés, arrêt sur End
// - jeton Error -> erreur typée (mot inconnu, nombre invalide, caractère)
// - multiplication implicite : `3pi`, `5(5)`, `(5)(5)`, `pi3`
// - injection de la réponse précédente (`*2`, `sin` seul)

use super::erreurs::CalcError;
use super::jetons::{Token, TokenKind};

fn erreur_de(jeton: &Token) -> CalcError {
    let mut chars = jeton.text.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() => CalcError::UnresolvedSymbol(jeton.text.clone()),
        Some(c) if c.is_ascii_digit() || c == '.' => {
            CalcError::NumericParseFailure(jeton.text.clone())
        }
        Some(c) => CalcError::MalformedCharacter(c),
        None => CalcError::InvalidExpression,
    }
}

/// Filtre les jetons puis insère les opérateurs implicites.
pub fn parse<I>(tokens: I) -> Result<Vec<Token>, CalcError>
where
    I: IntoIterator<Item = Token>,
{
    let mut out = Vec::new();

    for t in tokens {
        match t.kind {
            TokenKind::Whitespace => {}
            TokenKind::End => break,
            TokenKind::Error => return Err(erreur_de(&t)),
            _ => out.push(t),
        }
    }

    Ok(add_missing_operator(out))
}

/// Insère `*` entre un jeton (nombre, `)`, constante) et le suivant
/// (nombre, `(`, constante, fonction).
pub fn add_missing_operator(tokens: Vec<Token>) -> Vec<Token> {
    let mut fixed = Vec::with_capacity(tokens.len());
    let mut last: Option<TokenKind> = None;

    for t in tokens {
        let avant = matches!(
            last,
            Some(TokenKind::Number | TokenKind::RParen | TokenKind::Constant)
        );
        let apres = matches!(
            t.kind,
            TokenKind::Number | TokenKind::LParen | TokenKind::Constant | TokenKind::Function
        );
        if avant && apres {
            fixed.push(Token::operator('*'));
        }

        last = Some(t.kind);
        fixed.push(t);
    }
    fixed
}

/// Complète une expression « ouverte » avec la constante `name` :
/// - commence par un opérateur => `name` devant
/// - sinon, finit par une fonction ou un opérateur => `name` derrière
///
/// Retourne (pile, injection faite).
pub fn inject_previous_answer(mut tokens: Vec<Token>, name: &str) -> (Vec<Token>, bool) {
    let ans = Token::new(TokenKind::Constant, name);

    match (tokens.first(), tokens.last()) {
        (Some(first), _) if first.kind == TokenKind::Operator => {
            tokens.insert(0, ans);
            (tokens, true)
        }
        (_, Some(last)) if matches!(last.kind, TokenKind::Function | TokenKind::Operator) => {
            tokens.push(ans);
            (tokens, true)
        }
        _ => (tokens, false),
    }
}
