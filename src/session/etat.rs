//! src/session/etat.rs
//!
//! État de session : table des symboles (surcouche utilisateur), dernière
//! réponse (`ans`) et précision d’affichage.
//!
//! Contrats :
//! - `evaluate` ne panique jamais : toute erreur finit dans `Resultat.error`.
//! - `ans` n’est mis à jour que sur un succès.
//! - Évaluations séquentielles seulement (`&mut self`).

use log::{debug, trace};

use crate::noyau::analyse::{inject_previous_answer, parse};
use crate::noyau::decimal::Decimal;
use crate::noyau::erreurs::CalcError;
use crate::noyau::eval::evaluate_postfix;
use crate::noyau::format::needs_engineering;
use crate::noyau::jetons::{format_tokens, Scanner, TokenKind};
use crate::noyau::rpn::to_postfix;
use crate::noyau::symboles::SymbolTable;
use crate::noyau::trig::est_inverse;

use super::resultat::Resultat;

/// Précision d’affichage par défaut (chiffres fractionnaires).
pub const DIGITS_DEFAUT: usize = 20;

/// Garde-fou : on borne la précision (anti-gel sur les périodes).
pub const DIGITS_MAX: usize = 200;

/// Nom de la pseudo-constante « réponse précédente ».
pub const ANS: &str = "ans";

#[derive(Clone, Debug)]
pub struct Session {
    symbols: SymbolTable,
    last_answer: Decimal,
    digits: usize,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Minuscules, virgule décimale => point, espaces de bord retirés.
fn normalise(expr: &str) -> String {
    expr.trim().to_lowercase().replace(',', ".")
}

impl Session {
    pub fn new() -> Self {
        let mut symbols = SymbolTable::new();
        symbols.add_constant(ANS, Decimal::zero());
        Session {
            symbols,
            last_answer: Decimal::zero(),
            digits: DIGITS_DEFAUT,
        }
    }

    /// Évalue une expression ; jamais d’erreur remontée, tout est dans le Resultat.
    pub fn evaluate(&mut self, expr: &str) -> Resultat {
        let mut r = Resultat::new(normalise(expr), self.digits);

        match self.pipeline(&mut r) {
            Ok(v) => {
                debug!("{:?} = {v}", r.expression);
                r.engineering_mode = needs_engineering(&v);
                self.symbols.add_constant(ANS, v.clone());
                self.last_answer = v.clone();
                r.value = Some(v);
            }
            Err(e) => {
                debug!("{:?} : {e}", r.expression);
                r.error = Some(e);
            }
        }
        r
    }

    fn pipeline(&self, r: &mut Resultat) -> Result<Decimal, CalcError> {
        let mut scanner = Scanner::new(&r.expression, &self.symbols);
        let infixe = parse(scanner.by_ref())?;

        r.degree_mode = scanner.saw_angle_literal()
            || infixe
                .iter()
                .any(|t| t.kind == TokenKind::Function && est_inverse(&t.text));

        let (infixe, partial) = inject_previous_answer(infixe, ANS);
        r.partial = partial;
        r.tokens = infixe.clone();
        trace!("infixe: {}", format_tokens(&r.tokens));

        let postfix = to_postfix(infixe);
        trace!("postfix: {}", format_tokens(&postfix));

        evaluate_postfix(&postfix, &self.symbols)
    }

    /// Ajoute ou remplace une constante utilisateur (nom en minuscules).
    pub fn add_constant(&mut self, name: &str, value: Decimal) {
        self.symbols.add_constant(&name.to_lowercase(), value);
    }

    pub fn last_answer(&self) -> &Decimal {
        &self.last_answer
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn digits(&self) -> usize {
        self.digits
    }

    /// Garde-fou : limite digits.
    pub fn set_digits(&mut self, digits: usize) {
        self.digits = digits.min(DIGITS_MAX);
    }
}
