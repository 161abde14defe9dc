// src/noyau/trig.rs
//
// Fonctions unaires du noyau.
// - Trig en DEGRÉS : entrée × π/180, sortie des inverses × 180/π
// - sin/cos/tan/ln/cbrt passent par f64 (précision double acceptée)
// - abs/ceil/floor exacts, sqrt à PRECISION_CALCUL chiffres
// - tout NaN/∞ devient une erreur (jamais de valeur silencieuse)

#![allow(clippy::excessive_precision)]

use super::decimal::Decimal;
use super::erreurs::CalcError;

/// N[Pi/180, 50]
pub const DEG_TO_RAD: f64 = 0.017453292519943295769236907684886127134428718885417;
/// N[180/Pi, 50]
pub const RAD_TO_DEG: f64 = 57.295779513082320876798154814105170332405472466564;

/// Fonction unaire du noyau.
pub type Fonction = fn(&Decimal) -> Result<Decimal, CalcError>;

/// Applique `f` en double et refuse les résultats non finis.
fn en_double(nom: &str, x: &Decimal, f: impl Fn(f64) -> f64) -> Result<Decimal, CalcError> {
    let r = f(x.to_f64());
    if !r.is_finite() {
        return Err(CalcError::UndefinedResult(format!("{nom}({x})")));
    }
    Decimal::from_f64(r)
}

pub fn sin(x: &Decimal) -> Result<Decimal, CalcError> {
    en_double("sin", x, |v| (v * DEG_TO_RAD).sin())
}

pub fn cos(x: &Decimal) -> Result<Decimal, CalcError> {
    en_double("cos", x, |v| (v * DEG_TO_RAD).cos())
}

pub fn tan(x: &Decimal) -> Result<Decimal, CalcError> {
    en_double("tan", x, |v| (v * DEG_TO_RAD).tan())
}

pub fn asin(x: &Decimal) -> Result<Decimal, CalcError> {
    en_double("asin", x, |v| v.asin() * RAD_TO_DEG)
}

pub fn acos(x: &Decimal) -> Result<Decimal, CalcError> {
    en_double("acos", x, |v| v.acos() * RAD_TO_DEG)
}

pub fn atan(x: &Decimal) -> Result<Decimal, CalcError> {
    en_double("atan", x, |v| v.atan() * RAD_TO_DEG)
}

pub fn ln(x: &Decimal) -> Result<Decimal, CalcError> {
    en_double("ln", x, f64::ln)
}

pub fn cbrt(x: &Decimal) -> Result<Decimal, CalcError> {
    en_double("cbrt", x, f64::cbrt)
}

pub fn sqrt(x: &Decimal) -> Result<Decimal, CalcError> {
    x.sqrt()
}

pub fn abs(x: &Decimal) -> Result<Decimal, CalcError> {
    Ok(x.abs())
}

pub fn ceil(x: &Decimal) -> Result<Decimal, CalcError> {
    Ok(x.ceil())
}

pub fn floor(x: &Decimal) -> Result<Decimal, CalcError> {
    Ok(x.floor())
}

/// Fonctions dont le résultat est un angle (affichage en degrés).
pub fn est_inverse(nom: &str) -> bool {
    matches!(nom, "asin" | "acos" | "atan")
}
