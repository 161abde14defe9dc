// src/noyau/lecture.rs
//
// Outils “scalés” : un réel r est représenté par l’entier floor(r × 10^digits)
// (ou arrondi, selon l’outil). Sert au rendu décimal, à la racine carrée
// et aux constantes (π, e, φ) calculées une seule fois.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};

/// Précision des constantes intégrées et des racines (chiffres décimaux).
pub const PRECISION_CALCUL: usize = 60;

/* ------------------------ Décimal (scaled -> texte) ------------------------ */

pub fn pow10(n: usize) -> BigInt {
    BigInt::from(10).pow(n as u32)
}

/// 10^e en rationnel, e pouvant être négatif.
pub fn pow10_rat(e: i64) -> BigRational {
    let p = BigRational::from_integer(pow10(e.unsigned_abs() as usize));
    if e < 0 {
        p.recip()
    } else {
        p
    }
}

/// Convertit un entier “scalé” (×10^digits) en texte décimal.
pub fn scaled_to_decimal(mut scaled: BigInt, digits: usize) -> String {
    let neg = scaled.is_negative();
    if neg {
        scaled = -scaled;
    }

    let scale = pow10(digits);
    let int_part = &scaled / &scale;
    let frac_part = &scaled % &scale;

    if digits == 0 {
        return if neg {
            format!("-{int_part}")
        } else {
            format!("{int_part}")
        };
    }

    let mut frac = frac_part.to_str_radix(10);
    while frac.len() < digits {
        frac.insert(0, '0');
    }

    if neg {
        format!("-{int_part}.{frac}")
    } else {
        format!("{int_part}.{frac}")
    }
}

/// r -> entier “scalé” arrondi (demi s’éloigne de zéro).
pub fn rational_scaled_arrondi(r: &BigRational, digits: usize) -> BigInt {
    (r * BigRational::from_integer(pow10(digits))).round().to_integer()
}

/// Entier scalé -> rationnel exact.
pub fn scaled_to_rational(scaled: BigInt, digits: usize) -> BigRational {
    BigRational::new(scaled, pow10(digits))
}

/* ------------------------ π (Machin) + cache ------------------------ */

/// arctan(1/q) en entier scalé (troncature) via série:
/// atan(z) = z - z^3/3 + z^5/5 - ...
fn arctan_inv_q_scaled(q: i64, scale: &BigInt) -> BigInt {
    let q = BigInt::from(q);

    let mut k: usize = 0;
    let mut sign_pos = true;

    // q^(2k+1)
    let mut q_pow = q.clone();
    let mut sum = BigInt::zero();

    loop {
        let d = &q_pow * BigInt::from(2 * k + 1);

        let term = scale / &d;
        if term.is_zero() {
            break;
        }

        if sign_pos {
            sum += &term;
        } else {
            sum -= &term;
        }

        q_pow *= &q;
        q_pow *= &q;

        sign_pos = !sign_pos;
        k += 1;
    }

    sum
}

fn pi_scaled_compute(digits: usize) -> BigInt {
    // extra pour amortir les erreurs de troncature
    let extra = 10usize;
    let scale = pow10(digits + extra);

    // Machin : π = 16*atan(1/5) - 4*atan(1/239)
    let a = arctan_inv_q_scaled(5, &scale);
    let b = arctan_inv_q_scaled(239, &scale);

    let pi = BigInt::from(16) * a - BigInt::from(4) * b;
    pi / pow10(extra)
}

static PI_CACHE: OnceLock<Mutex<HashMap<usize, BigInt>>> = OnceLock::new();

pub fn pi_scaled_cached(digits: usize) -> BigInt {
    let m = PI_CACHE.get_or_init(|| Mutex::new(HashMap::new()));
    // un cache empoisonné reste lisible : son contenu est toujours cohérent
    let mut guard = m.lock().unwrap_or_else(|e| e.into_inner());

    if let Some(v) = guard.get(&digits) {
        return v.clone();
    }

    let v = pi_scaled_compute(digits);
    guard.insert(digits, v.clone());
    v
}

/* ------------------------ e (série 1/k!) ------------------------ */

pub fn e_scaled_compute(digits: usize) -> BigInt {
    let extra = 10usize;
    let scale = pow10(digits + extra);

    let mut sum = BigInt::zero();
    let mut term = scale.clone(); // 1/0!
    let mut k: u32 = 1;

    while !term.is_zero() {
        sum += &term;
        term /= k;
        k += 1;
    }

    sum / pow10(extra)
}

/* ------------------------ √ (approx scalée) ------------------------ */

/// sqrt(r) en entier scalé : floor( sqrt(r) * 10^digits ), r >= 0
pub fn rational_sqrt_scaled(r: &BigRational, digits: usize) -> BigInt {
    let n = r.numer().clone();
    let d = r.denom().clone();

    if n.is_zero() {
        return BigInt::zero();
    }

    // On veut y ≈ sqrt(n/d) * 10^digits
    // => y^2 ≈ (n * 10^(2*digits)) / d
    let target = n * pow10(2 * digits);

    // point de départ au-dessus de la racine : Newton décroît alors vers le plancher
    let approx = &target / &d;
    let mut y = BigInt::one() << (approx.bits() / 2 + 1);

    loop {
        if y.is_zero() {
            break;
        }
        let q = &target / (&d * &y);
        let y_next = (&y + q) >> 1;

        if y_next >= y {
            break;
        }
        y = y_next;
    }

    // ajustement final (floor)
    while (&y + 1u32) * (&y + 1u32) * &d <= target {
        y += 1u32;
    }
    while &y * &y * &d > target {
        y -= 1u32;
    }
    y
}

/* ------------------------ Puissance entière ------------------------ */

/// base^exp par carrés successifs ; le signe de l’exposant reste à l’appelant.
pub fn rational_pow_int(base: BigRational, exp: u64) -> BigRational {
    let mut e = exp;
    let mut acc = BigRational::one();
    let mut b = base;

    while e > 0 {
        if (e & 1) == 1 {
            acc *= b.clone();
        }
        e >>= 1;
        if e > 0 {
            b *= b.clone();
        }
    }
    acc
}
