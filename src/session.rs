// src/session.rs
//
// Session — état possédé par le shell appelant
// --------------------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + resultat.rs)
// - Ré-exporter Session et Resultat
//
// Le noyau reste sans état : la table des symboles, `ans` et la précision
// d’affichage vivent ici.

pub mod etat;
pub mod resultat;

pub use etat::{Session, ANS, DIGITS_DEFAUT, DIGITS_MAX};
pub use resultat::Resultat;
