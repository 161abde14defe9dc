//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - on accepte les erreurs de domaine (division par zéro, ln(-1), ...)
//! - invariant clé : erreur posée => pas de valeur, et inversement

use std::time::{Duration, Instant};

use super::erreurs::CalcError;
use super::eval_expression;
use super::symboles::SymbolTable;
use crate::session::{Resultat, Session};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Helpers fuzz ------------------------ */

/// Erreurs normales pour des expressions bien formées.
fn is_erreur_attendue(e: &CalcError) -> bool {
    matches!(
        e,
        CalcError::DivisionByZero | CalcError::UndefinedResult(_)
    )
}

fn check_invariant_resultat(r: &Resultat) {
    assert_ne!(
        r.error.is_some(),
        r.value.is_some(),
        "valeur XOR erreur: expr={:?}",
        r.expression
    );
    // l’affichage ne panique jamais
    let _ = r.to_string();
    let _ = r.expression_text();
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_nombre(rng: &mut Rng) -> String {
    let a = rng.pick(100);
    match rng.pick(4) {
        0 => format!("{a}"),
        1 => format!("{a}.{}", rng.pick(1000)),
        2 => format!("{a}/{}", rng.pick(9) + 1),
        _ => format!("{}d{}'{}\"", a % 90, rng.pick(60), rng.pick(60)),
    }
}

fn gen_atom(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 | 1 | 2 => gen_nombre(rng),
        3 => "pi".to_string(),
        4 => "e".to_string(),
        _ => "phi".to_string(),
    }
}

const FONCTIONS: [&str; 12] = [
    "sin", "cos", "tan", "asin", "acos", "atan", "ln", "abs", "sqrt", "cbrt", "ceil", "floor",
];

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atom(rng);
    }

    match rng.pick(9) {
        0 => gen_atom(rng),
        1 => format!("({}+{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        2 => format!("({}-{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        3 => format!("({}*{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        4 => format!("({}/{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        5 => format!("({})^{}", gen_expr(rng, depth - 1), rng.pick(4)),
        6 => {
            // multiplication implicite
            if rng.coin() {
                format!("{}({})", rng.pick(9) + 1, gen_expr(rng, depth - 1))
            } else {
                format!("({})({})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1))
            }
        }
        _ => {
            let f = FONCTIONS[rng.pick(FONCTIONS.len() as u32) as usize];
            format!("{f}({})", gen_expr(rng, depth - 1))
        }
    }
}

/// Texte arbitraire sur un alphabet “proche” du langage.
fn gen_bruit(rng: &mut Rng) -> String {
    const ALPHABET: &[char] = &[
        '0', '1', '5', '9', '.', ',', '+', '-', '*', '/', '^', '(', ')', 'd', 'm', 's', '\'', '"',
        '°', ' ', 's', 'i', 'n', 'p', 'e', 'x', '√', '#', 'a', 't',
    ];
    let n = rng.pick(16) as usize;
    (0..n)
        .map(|_| ALPHABET[rng.pick(ALPHABET.len() as u32) as usize])
        .collect()
}

/* ------------------------ Helper somme balancée ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_expressions_bien_formees() {
    let t0 = Instant::now();
    let max = Duration::from_secs(5);

    let mut rng = Rng::new(0xC0FFEE_u64);
    let table = SymbolTable::new();

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..120 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);

        match eval_expression(&expr, &table) {
            Ok(_) => seen_ok += 1,
            Err(e) => {
                assert!(
                    is_erreur_attendue(&e),
                    "erreur non attendue: expr={expr:?} err={e}"
                );
                seen_err += 1;
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 10, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_determinisme_session() {
    let t0 = Instant::now();
    let max = Duration::from_secs(5);

    // Même seed => mêmes expressions => mêmes sorties (y compris `ans`)
    let passe = |seed: u64| -> Vec<String> {
        let mut rng = Rng::new(seed);
        let mut s = Session::new();
        (0..60)
            .map(|_| {
                budget(t0, max);
                let expr = if rng.coin() {
                    gen_expr(&mut rng, 3)
                } else {
                    // expression ouverte : `ans` injecté
                    format!("*{}", gen_atom(&mut rng))
                };
                let r = s.evaluate(&expr);
                check_invariant_resultat(&r);
                r.to_string()
            })
            .collect()
    };

    assert_eq!(passe(0xBADC0DE_u64), passe(0xBADC0DE_u64));
}

#[test]
fn fuzz_safe_bruit_ne_panique_pas() {
    let t0 = Instant::now();
    let max = Duration::from_secs(5);

    let mut rng = Rng::new(0x5EED_u64);
    let mut s = Session::new();

    for _ in 0..400 {
        budget(t0, max);
        let expr = gen_bruit(&mut rng);
        let r = s.evaluate(&expr);
        check_invariant_resultat(&r);
    }
}

#[test]
fn fuzz_safe_somme_balancee() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    let expr = somme_balancee("1/2", 800);
    budget(t0, max);

    let v = eval_expression(&expr, &SymbolTable::new()).unwrap_or_else(|e| panic!("err: {e}"));

    // 800*(1/2) = 400
    assert_eq!(v.to_string(), "400");
}
