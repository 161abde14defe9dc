//! Noyau exact
//!
//! Organisation interne :
//! - erreurs.rs   : taxonomie CalcError
//! - lecture.rs   : outils scalés (π Machin + cache, e, √ Newton, puissances)
//! - decimal.rs   : Decimal (rationnel exact) + texte canonique
//! - dms.rs       : littéraux degrés/minutes/secondes
//! - trig.rs      : fonctions unaires (trig en degrés)
//! - symboles.rs  : table des symboles (intégrés + surcouche utilisateur)
//! - jetons.rs    : scanner paresseux
//! - analyse.rs   : filtre, multiplication implicite, injection de `ans`
//! - rpn.rs       : shunting-yard -> postfix
//! - eval.rs      : évaluation de la postfix
//! - format.rs    : période surlignée, ingénieur, DMS

pub mod analyse;
pub mod decimal;
pub mod dms;
pub mod erreurs;
pub mod eval;
pub mod format;
pub mod jetons;
pub mod lecture;
pub mod rpn;
pub mod symboles;
pub mod trig;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

pub use eval::eval_expression;
