//! Noyau — évaluation de la postfix
//!
//! jetons -> analyse -> shunting-yard -> pile de valeurs -> Decimal
//!
//! Une seule pile de valeurs : le rôle de “fonction en attente d’argument”
//! est tenu par la pile du shunting-yard, une fonction suit donc toujours
//! son argument en postfix.

use log::trace;

use super::analyse::parse;
use super::decimal::Decimal;
use super::erreurs::CalcError;
use super::jetons::{format_tokens, Scanner, Token, TokenKind};
use super::rpn::{operateur, to_postfix};
use super::symboles::SymbolTable;

/// Évalue une postfix contre une table de symboles.
///
/// Résolution stricte : une constante ou fonction inconnue est une erreur.
pub fn evaluate_postfix(postfix: &[Token], symbols: &SymbolTable) -> Result<Decimal, CalcError> {
    let mut pile: Vec<Decimal> = Vec::with_capacity(postfix.len());

    for tok in postfix {
        match tok.kind {
            TokenKind::Number => pile.push(Decimal::parse(&tok.text)?),

            TokenKind::Constant => {
                let v = symbols
                    .constant(&tok.text)
                    .ok_or_else(|| CalcError::UnresolvedSymbol(tok.text.clone()))?;
                pile.push(v);
            }

            TokenKind::Function => {
                let f = symbols
                    .function(&tok.text)
                    .ok_or_else(|| CalcError::UnresolvedSymbol(tok.text.clone()))?;
                let x = pile.pop().ok_or(CalcError::InvalidExpression)?;
                pile.push(f(&x)?);
            }

            TokenKind::Operator => {
                let op = operateur(&tok.text)
                    .ok_or_else(|| CalcError::UnresolvedSymbol(tok.text.clone()))?;
                // opérandes : droite puis gauche
                let y = pile.pop().ok_or(CalcError::InvalidExpression)?;
                let x = pile.pop().ok_or(CalcError::InvalidExpression)?;
                pile.push((op.applique)(&x, &y)?);
            }

            TokenKind::Whitespace | TokenKind::End => {}

            TokenKind::LParen | TokenKind::RParen | TokenKind::Error => {
                return Err(CalcError::InvalidExpression)
            }
        }
    }

    match (pile.pop(), pile.is_empty()) {
        (Some(v), true) => Ok(v),
        _ => Err(CalcError::InvalidExpression),
    }
}

/// Pipeline complet sans état de session (pas de `ans`).
pub fn eval_expression(expr: &str, symbols: &SymbolTable) -> Result<Decimal, CalcError> {
    let infixe = parse(Scanner::new(expr, symbols))?;
    trace!("infixe: {}", format_tokens(&infixe));

    let postfix = to_postfix(infixe);
    trace!("postfix: {}", format_tokens(&postfix));

    evaluate_postfix(&postfix, symbols)
}
