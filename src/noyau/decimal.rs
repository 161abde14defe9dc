// src/noyau/decimal.rs
//
// Valeur décimale exacte (rationnel big int).
// - exacte pour + - * /, puissances entières, abs, ceil, floor
// - les fonctions transcendantes passent par f64 (frontière de précision acceptée)
// - texte canonique : décimal le plus court si la valeur se termine,
//   sinon CANONICAL_DIGITS chiffres arrondis.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

use super::erreurs::CalcError;
use super::lecture::{
    pow10, rational_pow_int, rational_scaled_arrondi, rational_sqrt_scaled, scaled_to_decimal,
    scaled_to_rational, PRECISION_CALCUL,
};

/// Largeur décimale d’une mantisse de 256 bits.
pub const CANONICAL_DIGITS: usize = 78;

/// Au-delà, la puissance entière passe en double (évite des entiers géants).
const POW_EXACT_MAX: u64 = 1024;
/// Taille maximale (en bits) d’une puissance exacte.
const POW_EXACT_BITS: u64 = 1 << 16;

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Decimal(BigRational);

impl Decimal {
    pub fn zero() -> Self {
        Decimal(BigRational::zero())
    }

    pub fn one() -> Self {
        Decimal(BigRational::one())
    }

    pub fn from_integer(n: i64) -> Self {
        Decimal(BigRational::from_integer(BigInt::from(n)))
    }

    /// p/q exact. q != 0.
    pub fn from_ratio(p: i64, q: i64) -> Result<Self, CalcError> {
        if q == 0 {
            return Err(CalcError::DivisionByZero);
        }
        Ok(Decimal(BigRational::new(BigInt::from(p), BigInt::from(q))))
    }

    pub fn from_rational(r: BigRational) -> Self {
        Decimal(r)
    }

    pub fn as_rational(&self) -> &BigRational {
        &self.0
    }

    /// Lit `[+-][chiffres][.[chiffres]][e[+-]chiffres]`.
    /// Les parties vides valent 0 (".", "5.", ".5"), mais pas la chaîne vide.
    pub fn parse(text: &str) -> Result<Self, CalcError> {
        let fail = || CalcError::NumericParseFailure(text.to_string());

        let (neg, corps) = match text.strip_prefix('-') {
            Some(r) => (true, r),
            None => (false, text.strip_prefix('+').unwrap_or(text)),
        };

        let (mantisse, exposant) = match corps.find(&['e', 'E'][..]) {
            Some(i) => (&corps[..i], Some(&corps[i + 1..])),
            None => (corps, None),
        };

        let (ent, frac) = match mantisse.split_once('.') {
            Some((a, b)) => (a, b),
            None => (mantisse, ""),
        };

        if mantisse.is_empty()
            || !ent.bytes().all(|b| b.is_ascii_digit())
            || !frac.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(fail());
        }

        let chiffres = format!("{ent}{frac}");
        let n = if chiffres.is_empty() {
            BigInt::zero()
        } else {
            BigInt::parse_bytes(chiffres.as_bytes(), 10).ok_or_else(fail)?
        };

        let mut e: i64 = -(frac.len() as i64);
        if let Some(x) = exposant {
            let v: i64 = x.parse().map_err(|_| fail())?;
            e = e.checked_add(v).ok_or_else(fail)?;
        }

        let mut r = BigRational::from_integer(n);
        if e != 0 {
            if e.unsigned_abs() > 100_000 {
                return Err(fail());
            }
            let p = BigRational::from_integer(pow10(e.unsigned_abs() as usize));
            r = if e > 0 { r * p } else { r / p };
        }

        Ok(Decimal(if neg { -r } else { r }))
    }

    /// Double -> décimal, via le texte décimal le plus court qui redonne le même double.
    pub fn from_f64(x: f64) -> Result<Self, CalcError> {
        if !x.is_finite() {
            return Err(CalcError::UndefinedResult(format!("{x}")));
        }
        Decimal::parse(&format!("{x}"))
    }

    /// Vers double ; NaN si la valeur n’est pas représentable.
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(f64::NAN)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    pub fn is_integer(&self) -> bool {
        self.0.is_integer()
    }

    pub fn abs(&self) -> Self {
        Decimal(self.0.abs())
    }

    pub fn floor(&self) -> Self {
        Decimal(self.0.floor())
    }

    pub fn ceil(&self) -> Self {
        Decimal(self.0.ceil())
    }

    pub fn checked_div(&self, rhs: &Decimal) -> Result<Self, CalcError> {
        if rhs.is_zero() {
            return Err(CalcError::DivisionByZero);
        }
        Ok(Decimal(&self.0 / &rhs.0))
    }

    /// x^y : exact pour un exposant entier raisonnable, double sinon.
    pub fn pow(&self, exp: &Decimal) -> Result<Self, CalcError> {
        if exp.is_integer() {
            if let Some(n) = exp.0.to_integer().to_i64() {
                let bits = self.0.numer().bits().max(self.0.denom().bits());
                let m = n.unsigned_abs();
                let taille = m.checked_mul(bits).unwrap_or(u64::MAX);
                if m <= POW_EXACT_MAX && taille <= POW_EXACT_BITS {
                    let p = rational_pow_int(self.0.clone(), m);
                    if n >= 0 {
                        return Ok(Decimal(p));
                    }
                    if p.is_zero() {
                        return Err(CalcError::DivisionByZero);
                    }
                    return Ok(Decimal(p.recip()));
                }
            }
        }

        let r = self.to_f64().powf(exp.to_f64());
        if r.is_nan() {
            return Err(CalcError::UndefinedResult(format!("{self}^{exp}")));
        }
        Decimal::from_f64(r)
    }

    /// Racine carrée à PRECISION_CALCUL chiffres (plancher).
    pub fn sqrt(&self) -> Result<Self, CalcError> {
        if self.is_negative() {
            return Err(CalcError::UndefinedResult(format!("sqrt({self})")));
        }
        let s = rational_sqrt_scaled(&self.0, PRECISION_CALCUL);
        Ok(Decimal(scaled_to_rational(s, PRECISION_CALCUL)))
    }

    /// Nombre de chiffres fractionnaires du développement exact, s’il se termine.
    pub fn terminating_digits(&self) -> Option<usize> {
        let mut d = self.0.denom().clone();
        let deux = BigInt::from(2);
        let cinq = BigInt::from(5);
        let (mut n2, mut n5) = (0usize, 0usize);

        while (&d % &deux).is_zero() {
            d /= &deux;
            n2 += 1;
        }
        while (&d % &cinq).is_zero() {
            d /= &cinq;
            n5 += 1;
        }

        if d.is_one() {
            Some(n2.max(n5))
        } else {
            None
        }
    }

    /// Rendu à `digits` chiffres fractionnaires, arrondi demi loin de zéro.
    pub fn to_fixed(&self, digits: usize) -> String {
        scaled_to_decimal(rational_scaled_arrondi(&self.0, digits), digits)
    }

    /// Texte canonique (sans zéros de queue).
    pub fn to_text(&self) -> String {
        let digits = match self.terminating_digits() {
            Some(n) if n <= CANONICAL_DIGITS => n,
            _ => CANONICAL_DIGITS,
        };
        trim_fraction(self.to_fixed(digits))
    }
}

/// Retire les zéros de queue de la partie fractionnaire (et le point orphelin).
pub fn trim_fraction(s: String) -> String {
    if !s.contains('.') {
        return s;
    }
    let t = s.trim_end_matches('0').trim_end_matches('.');
    if t == "-0" {
        "0".to_string()
    } else {
        t.to_string()
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_text())
    }
}

impl FromStr for Decimal {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::parse(s)
    }
}

impl Add for Decimal {
    type Output = Decimal;
    fn add(self, rhs: Decimal) -> Decimal {
        Decimal(self.0 + rhs.0)
    }
}

impl Sub for Decimal {
    type Output = Decimal;
    fn sub(self, rhs: Decimal) -> Decimal {
        Decimal(self.0 - rhs.0)
    }
}

impl Mul for Decimal {
    type Output = Decimal;
    fn mul(self, rhs: Decimal) -> Decimal {
        Decimal(self.0 * rhs.0)
    }
}

impl Neg for Decimal {
    type Output = Decimal;
    fn neg(self) -> Decimal {
        Decimal(-self.0)
    }
}
