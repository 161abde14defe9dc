// src/noyau/rpn.rs
//
// Shunting-yard : pile infixe -> postfix (notation polonaise inversée)
//
// Règles:
// - Number / Constant : sortie directe
// - Function : gardée sur la pile, sortie dès que son argument est complet
//   (après la parenthèse fermante, avant tout opérateur, ou en fin d’entrée)
// - Operator : dépile tant que le sommet est plus prioritaire (ou égal et
//   associatif à gauche), puis empile
// - Moins/plus unaire en tête ou juste après '(' : on injecte 0 ("(-x" => "0 x -")
// - '(' orphelines ignorées en fin d’entrée, ')' orphelines ignorées
//
// Conversion totale : une entrée mal formée donne une postfix que l’évaluateur refusera.

use super::decimal::Decimal;
use super::erreurs::CalcError;
use super::jetons::{Token, TokenKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Associativite {
    Gauche,
    Droite,
}

/// Opération binaire f(x, y).
pub type Binaire = fn(&Decimal, &Decimal) -> Result<Decimal, CalcError>;

#[derive(Clone, Copy)]
pub struct Operateur {
    pub precedence: u8,
    pub associativite: Associativite,
    pub applique: Binaire,
}

fn plus(x: &Decimal, y: &Decimal) -> Result<Decimal, CalcError> {
    Ok(x.clone() + y.clone())
}

fn moins(x: &Decimal, y: &Decimal) -> Result<Decimal, CalcError> {
    Ok(x.clone() - y.clone())
}

fn fois(x: &Decimal, y: &Decimal) -> Result<Decimal, CalcError> {
    Ok(x.clone() * y.clone())
}

fn divise(x: &Decimal, y: &Decimal) -> Result<Decimal, CalcError> {
    x.checked_div(y)
}

fn puissance(x: &Decimal, y: &Decimal) -> Result<Decimal, CalcError> {
    x.pow(y)
}

/// Table statique des cinq opérateurs.
pub fn operateur(symbole: &str) -> Option<Operateur> {
    use Associativite::*;

    let (precedence, associativite, applique): (u8, Associativite, Binaire) = match symbole {
        "^" => (4, Droite, puissance),
        "*" => (3, Gauche, fois),
        "/" => (3, Gauche, divise),
        "+" => (2, Gauche, plus),
        "-" => (2, Gauche, moins),
        _ => return None,
    };

    Some(Operateur {
        precedence,
        associativite,
        applique,
    })
}

/// Le sommet `top` doit-il sortir avant d’empiler `courant` ?
fn doit_depiler(top: &Token, courant: &Operateur) -> bool {
    match top.kind {
        // une fonction reste collée à son argument : elle sort avant l’opérateur
        TokenKind::Function => true,
        TokenKind::Operator => match operateur(&top.text) {
            Some(t) => {
                t.precedence > courant.precedence
                    || (t.precedence == courant.precedence
                        && courant.associativite == Associativite::Gauche)
            }
            None => false,
        },
        _ => false,
    }
}

/// Convertit une pile infixe (sans espaces) en postfix.
///
/// Exemple:
///   infixe:  [sin, (, 90, -, 10, ), +, 1]
///   postfix: [90, 10, -, sin, 1, +]
pub fn to_postfix(tokens: Vec<Token>) -> Vec<Token> {
    let mut out: Vec<Token> = Vec::with_capacity(tokens.len());
    let mut ops: Vec<Token> = Vec::new();

    // “début de sous-expression” : en tête ou juste après '('
    let mut debut = true;

    for tok in tokens {
        match tok.kind {
            TokenKind::Number | TokenKind::Constant => {
                out.push(tok);
                debut = false;
            }

            TokenKind::Function => {
                ops.push(tok);
                debut = false;
            }

            TokenKind::LParen => {
                ops.push(tok);
                debut = true;
            }

            TokenKind::RParen => {
                // dépile jusqu’à '(' ; une ')' orpheline vide simplement la pile
                while let Some(top) = ops.pop() {
                    if top.kind == TokenKind::LParen {
                        break;
                    }
                    out.push(top);
                }

                // la fonction qui attendait cette parenthèse
                if ops.last().is_some_and(|t| t.kind == TokenKind::Function) {
                    out.extend(ops.pop());
                }
                debut = false;
            }

            TokenKind::Operator => {
                let Some(courant) = operateur(&tok.text) else {
                    // symbole inconnu : laissé à l’évaluateur, qui le refusera
                    out.push(tok);
                    continue;
                };

                if debut && matches!(tok.text.as_str(), "-" | "+") {
                    out.push(Token::number("0"));
                }

                while let Some(top) = ops.last() {
                    if !doit_depiler(top, &courant) {
                        break;
                    }
                    out.extend(ops.pop());
                }

                ops.push(tok);
                debut = false;
            }

            TokenKind::Whitespace | TokenKind::End | TokenKind::Error => {}
        }
    }

    // vide la pile ; les '(' non fermées sont tolérées
    while let Some(top) = ops.pop() {
        if top.kind != TokenKind::LParen {
            out.push(top);
        }
    }

    out
}
