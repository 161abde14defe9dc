// src/noyau/format.rs
//
// Rendu du résultat :
// - décimal minimal avec période surlignée (U+0305 devant chaque chiffre)
// - notation ingénieur au-delà des seuils
// - degrés/minutes/secondes

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use super::decimal::{trim_fraction, Decimal};
use super::lecture::{pow10, pow10_rat, rational_scaled_arrondi, scaled_to_decimal};

/// |v| au-dessus => notation ingénieur.
pub const ENG_MAX: i64 = 9_999_999_999_999;
/// 0 < |v| en dessous => notation ingénieur (1e-8).
pub const ENG_MIN_EXPOSANT: i64 = -8;

/// Chiffres fractionnaires minimum (depuis le début du motif) pour annoncer une période.
pub const MIN_REPETITION: usize = 6;
/// Une fraction de plus de MIN_NEUFS neufs est une retenue.
pub const MIN_NEUFS: usize = 10;

const CHIFFRES_ENG: usize = 6;
const CHIFFRES_SECONDES: usize = 5;

const SURLIGNE: char = '\u{0305}';

/* ------------------------ Seuils ------------------------ */

pub fn needs_engineering(v: &Decimal) -> bool {
    if v.is_zero() {
        return false;
    }
    let a = v.abs();
    let max = BigRational::from_integer(BigInt::from(ENG_MAX));
    let min = pow10_rat(ENG_MIN_EXPOSANT);
    *a.as_rational() > max || *a.as_rational() < min
}

/* ------------------------ Période ------------------------ */

fn overline(motif: &str) -> String {
    let mut s = String::with_capacity(motif.len() * 3);
    for c in motif.chars() {
        s.push(SURLIGNE);
        s.push(c);
    }
    s
}

/// (début, longueur) du premier motif qui remplit la fin de `f`.
/// Le dernier chiffre peut valoir motif+1 (arrondi).
fn motif_recurrent(f: &[u8]) -> Option<(usize, usize)> {
    let l = f.len();

    for debut in 0..l {
        if l - debut < MIN_REPETITION {
            break;
        }
        for longueur in 1..=(l - debut) {
            // au moins deux motifs complets
            if debut + 2 * longueur > l {
                break;
            }
            let motif = &f[debut..debut + longueur];
            let repete = (debut + longueur..l).all(|i| {
                let attendu = motif[(i - debut) % longueur];
                f[i] == attendu || (i == l - 1 && f[i] == attendu + 1)
            });
            if repete {
                return Some((debut, longueur));
            }
        }
    }
    None
}

/// Décimal le plus court, période surlignée si le développement ne se termine pas
/// dans `precision` chiffres.
///
/// 1/3 à 10 chiffres => "0.̅3", 1/6 => "0.1̅6", 0.5 => "0.5".
pub fn format_recurring(value: &Decimal, precision: usize) -> String {
    if value.is_zero() {
        return "0".to_string();
    }
    let sign = if value.is_negative() { "-" } else { "" };
    let a = value.abs();

    // développement fini et assez court : exact
    if let Some(n) = a.terminating_digits() {
        if n <= precision {
            return format!("{sign}{}", trim_fraction(a.to_fixed(n)));
        }
    }

    let fixe = a.to_fixed(precision);
    let (entier, fraction) = match fixe.split_once('.') {
        Some((e, f)) => (e, f.trim_end_matches('0')),
        None => (fixe.as_str(), ""),
    };

    if fraction.len() > MIN_NEUFS && fraction.bytes().all(|b| b == b'9') {
        if let Ok(n) = entier.parse::<BigInt>() {
            return format!("{sign}{}", n + 1);
        }
    }

    if fraction.is_empty() {
        // arrondi à zéro : pas de signe
        return if entier == "0" {
            "0".to_string()
        } else {
            format!("{sign}{entier}")
        };
    }

    match motif_recurrent(fraction.as_bytes()) {
        Some((debut, longueur)) => format!(
            "{sign}{entier}.{}{}",
            &fraction[..debut],
            overline(&fraction[debut..debut + longueur])
        ),
        None => format!("{sign}{entier}.{fraction}"),
    }
}

/* ------------------------ Ingénieur ------------------------ */

/// `d.dddddde±XX` (mantisse arrondie demi loin de zéro).
pub fn format_engineering(value: &Decimal) -> String {
    if value.is_zero() {
        return format!("{}e+00", scaled_to_decimal(BigInt::zero(), CHIFFRES_ENG));
    }
    let sign = if value.is_negative() { "-" } else { "" };
    let a = value.as_rational().abs();

    // estimation par le nombre de chiffres, puis ajustement
    let chiffres = |n: &BigInt| n.to_str_radix(10).len() as i64;
    let mut exp = chiffres(a.numer()) - chiffres(a.denom());
    let dix = BigRational::from_integer(BigInt::from(10));
    let mut m = &a * pow10_rat(-exp);
    while m >= dix {
        m /= &dix;
        exp += 1;
    }
    while m < BigRational::one() {
        m *= &dix;
        exp -= 1;
    }

    let mut s = rational_scaled_arrondi(&m, CHIFFRES_ENG);
    // 9.9999995 -> 10.000000 : renormalise
    if s >= pow10(CHIFFRES_ENG + 1) {
        s /= BigInt::from(10);
        exp += 1;
    }

    let signe_exp = if exp < 0 { '-' } else { '+' };
    format!(
        "{sign}{}e{signe_exp}{:02}",
        scaled_to_decimal(s, CHIFFRES_ENG),
        exp.abs()
    )
}

/* ------------------------ DMS ------------------------ */

/// Degrés décimaux -> `D°M'S.SSSSS"` (calcul exact, retenue sur les secondes).
pub fn format_dms(value: &Decimal) -> String {
    let unite = pow10(CHIFFRES_SECONDES);
    // total en 1e-5 secondes
    let secondes = value.as_rational().abs() * BigRational::from_integer(BigInt::from(3600));
    let total = rational_scaled_arrondi(&secondes, CHIFFRES_SECONDES);

    let par_degre = &unite * BigInt::from(3600);
    let par_minute = &unite * BigInt::from(60);

    let d = &total / &par_degre;
    let reste = &total % &par_degre;
    let m = &reste / &par_minute;
    let s = &reste % &par_minute;

    let sign = if value.is_negative() && !total.is_zero() {
        "-"
    } else {
        ""
    };
    format!(
        "{sign}{d}°{m}'{}\"",
        scaled_to_decimal(s, CHIFFRES_SECONDES)
    )
}
