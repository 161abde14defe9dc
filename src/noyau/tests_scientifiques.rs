//! Tests scientifiques (campagne) : invariants + robustesse + limites contrôlées.
//!
//! But : vérifier les propriétés du pipeline sans faire chauffer la machine.
//! - budget temps global
//! - tailles bornées (profondeur, longueur)
//! - comparaisons exactes quand le calcul est rationnel, tolérance 1e-10 sinon

use std::time::{Duration, Instant};

use proptest::prelude::*;

use super::decimal::Decimal;
use super::dms::deg_to_decimal;
use super::erreurs::CalcError;
use super::eval_expression;
use super::format::format_recurring;
use super::symboles::SymbolTable;
use super::trig;
use crate::session::Session;

fn eval_ok(expr: &str) -> Decimal {
    eval_expression(expr, &SymbolTable::new()).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn d(s: &str) -> Decimal {
    Decimal::parse(s).unwrap_or_else(|e| panic!("{s:?}: {e}"))
}

fn assert_proche(a: &Decimal, b: &Decimal, ctx: &str) {
    let ecart = (a.clone() - b.clone()).abs();
    assert!(
        ecart < d("1e-10"),
        "{ctx}: {a} et {b} diffèrent de {ecart}"
    );
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ DMS ------------------------ */

#[test]
fn sci_dms_exemple() {
    let v = deg_to_decimal("45d20'12.5\"").unwrap();
    let attendu = d("45")
        + d("20").checked_div(&d("60")).unwrap()
        + d("12.5").checked_div(&d("3600")).unwrap();
    assert_proche(&v, &attendu, "45d20'12.5\"");
}

#[test]
fn sci_dms_alias() {
    assert_eq!(
        deg_to_decimal("45d20m15s").unwrap(),
        deg_to_decimal("45d20'15\"").unwrap()
    );
}

proptest! {
    #[test]
    fn sci_dms_sans_unite_egal_decimal(s in "[0-9]{1,9}(\\.[0-9]{0,9})?") {
        prop_assert_eq!(deg_to_decimal(&s).unwrap(), Decimal::parse(&s).unwrap());
    }

    #[test]
    fn sci_dms_fraction_seule(s in "\\.[0-9]{1,9}") {
        prop_assert_eq!(deg_to_decimal(&s).unwrap(), Decimal::parse(&s).unwrap());
    }

    #[test]
    fn sci_aller_retour_fini(n in -1_000_000_000i64..1_000_000_000, k in 0u32..8) {
        // n / 10^k : développement fini, jamais surligné
        let v = Decimal::from_integer(n).checked_div(&Decimal::from_integer(10i64.pow(k))).unwrap();
        let texte = format_recurring(&v, 20);
        let surligne = texte.contains('\u{0305}');
        prop_assert!(!surligne);
        prop_assert_eq!(Decimal::parse(&texte).unwrap(), v);
    }
}

/* ------------------------ Multiplication implicite ------------------------ */

#[test]
fn sci_multiplication_implicite() {
    let pi = SymbolTable::new().constant("pi").unwrap();
    assert_eq!(eval_ok("3pi"), Decimal::from_integer(3) * pi.clone());
    assert_eq!(eval_ok("pi3"), pi * Decimal::from_integer(3));
    assert_eq!(eval_ok("5(5)"), d("25"));
    assert_eq!(eval_ok("(5)(5)"), d("25"));
    assert_eq!(eval_ok("2(3)(4)"), d("24"));
}

/* ------------------------ Précédence / associativité ------------------------ */

#[test]
fn sci_precedence() {
    // 1 + 3 - (2^3)/5*3 + 2*3 = 4 - 4.8 + 6
    assert_eq!(eval_ok("1+3-2^3/5*3+2*3"), d("5.2"));
    assert_eq!(eval_ok("2^3^2"), d("512"));
    assert_eq!(eval_ok("100/10/5"), d("2"));
    assert_eq!(eval_ok("10-4-3"), d("3"));
}

/* ------------------------ Ordre d’application des fonctions ------------------------ */

#[test]
fn sci_fonctions_imbriquees() {
    let t30 = trig::tan(&d("30")).unwrap();
    let attendu = trig::tan(&t30).unwrap();
    assert_eq!(eval_ok("tan(tan(30))"), attendu);
    assert_eq!(eval_ok("tantan30"), attendu);

    let t45 = trig::tan(&d("45")).unwrap();
    assert_eq!(eval_ok("5tan45"), Decimal::from_integer(5) * t45);
    assert_eq!(eval_ok("5sin90"), d("5"));
}

/* ------------------------ Périodes ------------------------ */

#[test]
fn sci_periodes() {
    let tiers = Decimal::from_ratio(1, 3).unwrap();
    assert_eq!(format_recurring(&tiers, 20), "0.\u{0305}3");

    let sixieme = Decimal::from_ratio(1, 6).unwrap();
    let s = format_recurring(&sixieme, 20);
    assert!(s.starts_with("0.1\u{0305}"), "{s:?}");
    assert_eq!(s.matches('\u{0305}').count(), 1);

    assert_eq!(format_recurring(&d("0.5"), 20), "0.5");
    assert_eq!(format_recurring(&Decimal::zero(), 20), "0");
}

#[test]
fn sci_aller_retour_irrationnels() {
    // ni fini ni périodique : texte tronqué relu à 10^-precision près
    let t = SymbolTable::new();
    let valeurs = [
        ("pi", t.constant("pi").unwrap()),
        ("e", t.constant("e").unwrap()),
        ("sqrt(2)", eval_ok("sqrt(2)")),
    ];
    for (nom, v) in valeurs {
        for precision in [10usize, 20, 30] {
            let texte = format_recurring(&v, precision);
            assert!(!texte.contains('\u{0305}'), "{nom}@{precision}: {texte:?}");
            let relu = d(&texte);
            let ecart = (relu - v.clone()).abs();
            assert!(
                ecart <= d(&format!("1e-{precision}")),
                "{nom}@{precision}: {texte} s’écarte de {ecart}"
            );
        }
    }
}

/* ------------------------ Erreurs de bord ------------------------ */

#[test]
fn sci_vide_et_moins_seul() {
    let mut s = Session::new();
    assert_eq!(s.evaluate("").error, Some(CalcError::InvalidExpression));
    assert_eq!(s.evaluate("-").error, Some(CalcError::InvalidExpression));
}

#[test]
fn sci_domaines() {
    let t = SymbolTable::new();
    for expr in ["ln(0)", "ln(-1)", "sqrt(-1)", "asin(2)", "acos(-2)", "(-8)^(1/3)", "2^5000"] {
        assert!(
            matches!(eval_expression(expr, &t), Err(CalcError::UndefinedResult(_))),
            "expr={expr:?}"
        );
    }
    assert_eq!(eval_expression("0^(-1)", &t), Err(CalcError::DivisionByZero));
}

#[test]
fn sci_exposant_extreme_sans_panique() {
    let mut s = Session::new();
    // -2^63 : bord inférieur de i64
    let r = s.evaluate("2^(0-9223372036854775808)");
    assert_eq!(r.error, None);
    assert_eq!(r.value, Some(Decimal::zero()));

    let r = s.evaluate("2^9223372036854775807");
    assert!(matches!(r.error, Some(CalcError::UndefinedResult(_))), "{:?}", r.error);
    assert_eq!(r.value, None);
}

/* ------------------------ Stress contrôlé (sans brûler) ------------------------ */

#[test]
fn sci_stress_somme_longue() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    let expr = vec!["1/2"; 800].join("+");
    budget(t0, max);

    assert_eq!(eval_ok(&expr), d("400"));
    budget(t0, max);
}

#[test]
fn sci_stress_parentheses_profondes() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    let n = 500;
    let expr = format!("{}1{}", "(".repeat(n), "+1)".repeat(n));
    assert_eq!(eval_ok(&expr), Decimal::from_integer(n as i64 + 1));
    budget(t0, max);
}

#[test]
fn sci_stress_racines_chainees() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    // sqrt(sqrt(...(2^1024))) : 10 racines => 2^1
    let mut expr = "2^1024".to_string();
    for _ in 0..10 {
        expr = format!("sqrt({expr})");
        budget(t0, max);
    }
    assert_proche(&eval_ok(&expr), &d("2"), "racines chaînées");
}

#[test]
fn sci_stress_bigint() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    let big = "9".repeat(100);
    let v = eval_ok(&format!("{big}/7 + 1/7"));
    budget(t0, max);

    // (10^100 - 1 + 1) / 7
    let attendu = d("1e100").checked_div(&d("7")).unwrap();
    assert_eq!(v, attendu);
}
