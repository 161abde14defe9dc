// src/noyau/dms.rs
//
// Littéraux sexagésimaux -> degrés décimaux.
// Ordre : degrés (d/°), minutes ('/m), secondes ("/s) ; chaque composante
// est optionnelle et vaut 0 par défaut ; sans unité, c’est des degrés.

use super::decimal::Decimal;
use super::erreurs::CalcError;

const DEGRES: [char; 2] = ['d', '°'];
const MINUTES: [char; 2] = ['\'', 'm'];
const SECONDES: [char; 2] = ['"', 's'];

pub fn est_unite(c: char) -> bool {
    DEGRES.contains(&c) || MINUTES.contains(&c) || SECONDES.contains(&c)
}

/// Composante vide ou "." => 0.
fn lire_composante(texte: &str) -> Result<Decimal, CalcError> {
    if texte.is_empty() {
        return Ok(Decimal::zero());
    }
    Decimal::parse(texte)
}

/// Lit une composante terminée par un des `marqueurs` (ou la fin du texte)
/// et avance `reste` au-delà du marqueur.
fn composante(reste: &mut &str, marqueurs: &[char]) -> Result<Decimal, CalcError> {
    if reste.is_empty() {
        return Ok(Decimal::zero());
    }

    // composante finale sans marqueur : "45d20" => 20 minutes
    if let Ok(v) = Decimal::parse(reste) {
        *reste = "";
        return Ok(v);
    }

    match reste.find(marqueurs) {
        Some(i) => {
            let v = lire_composante(&reste[..i])?;
            let m = reste[i..].chars().next().map_or(1, char::len_utf8);
            *reste = &reste[i + m..];
            Ok(v)
        }
        None => Ok(Decimal::zero()),
    }
}

/// `45d20'12.5"` -> 45 + 20/60 + 12.5/3600
pub fn deg_to_decimal(texte: &str) -> Result<Decimal, CalcError> {
    let mut reste = texte;

    let d = composante(&mut reste, &DEGRES)?;
    let m = composante(&mut reste, &MINUTES)?;
    let s = composante(&mut reste, &SECONDES)?;

    if !reste.is_empty() {
        return Err(CalcError::NumericParseFailure(texte.to_string()));
    }

    let m60 = m.checked_div(&Decimal::from_integer(60))?;
    let s3600 = s.checked_div(&Decimal::from_integer(3600))?;
    Ok(d + m60 + s3600)
}
