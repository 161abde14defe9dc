//! src/session/resultat.rs
//!
//! Résultat d’une évaluation (valeur OU erreur, jamais les deux).
//!
//! Contrats :
//! - `value` est None dès que `error` est posé.
//! - `tokens` : pile infixe telle qu’évaluée (multiplications implicites et `ans` compris).
//! - L’affichage choisit DMS, puis ingénieur, puis décimal surligné.

use std::fmt;

use crate::noyau::decimal::Decimal;
use crate::noyau::erreurs::CalcError;
use crate::noyau::format::{format_dms, format_engineering, format_recurring};
use crate::noyau::jetons::{Token, TokenKind};

#[derive(Clone, Debug, PartialEq)]
pub struct Resultat {
    /// Entrée normalisée (minuscules, virgule => point, sans espaces de bord).
    pub expression: String,
    pub value: Option<Decimal>,
    pub error: Option<CalcError>,

    // --- modes d’affichage ---
    pub degree_mode: bool,
    pub engineering_mode: bool,

    /// `ans` injecté (`*2`, `sin` seul).
    pub partial: bool,
    pub tokens: Vec<Token>,

    /// Précision du rendu décimal.
    pub digits: usize,
}

impl Resultat {
    pub(crate) fn new(expression: impl Into<String>, digits: usize) -> Self {
        Resultat {
            expression: expression.into(),
            value: None,
            error: None,
            degree_mode: false,
            engineering_mode: false,
            partial: false,
            tokens: Vec::new(),
            digits,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none() && self.value.is_some()
    }

    /// Réaffiche la pile infixe jeton par jeton via `printer(texte, jeton)`.
    ///
    /// - une valeur collée à une fonction est entourée : `sin90` => `sin(90)`
    /// - `+` et `-` sont aérés : ` + `
    pub fn format_expression<F>(&self, mut printer: F)
    where
        F: FnMut(&str, &Token),
    {
        let mut precedent: Option<TokenKind> = None;

        for t in &self.tokens {
            let entoure = precedent == Some(TokenKind::Function) && t.is_value();
            if entoure {
                printer("(", t);
            }

            match (t.kind, t.text.as_str()) {
                (TokenKind::Operator, op @ ("+" | "-")) => printer(&format!(" {op} "), t),
                _ => printer(&t.text, t),
            }

            if entoure {
                printer(")", t);
            }
            precedent = Some(t.kind);
        }
    }

    /// `format_expression` sans décoration.
    pub fn expression_text(&self) -> String {
        let mut s = String::new();
        self.format_expression(|texte, _| s.push_str(texte));
        s
    }
}

impl fmt::Display for Resultat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(e) = &self.error {
            return write!(f, "{e}");
        }
        let Some(v) = &self.value else {
            return Ok(());
        };

        if self.degree_mode {
            write!(f, "{}", format_dms(v))
        } else if self.engineering_mode {
            write!(f, "{}", format_engineering(v))
        } else {
            write!(f, "{}", format_recurring(v, self.digits))
        }
    }
}
