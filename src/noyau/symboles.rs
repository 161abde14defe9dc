// src/noyau/symboles.rs
//
// Table des symboles : nom (minuscules) -> fonction | constante.
// - intégrés : instantané immuable, partagé par tout le processus
// - utilisateur : surcouche possédée par chaque table (ans, set x ...)
//   consultée EN PREMIER (une définition utilisateur masque un intégré)

use std::collections::HashMap;
use std::sync::OnceLock;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::One;

use super::decimal::Decimal;
use super::jetons::TokenKind;
use super::lecture::{
    e_scaled_compute, pi_scaled_cached, rational_sqrt_scaled, scaled_to_rational, PRECISION_CALCUL,
};
use super::trig::{self, Fonction};

/// Producteur de constante intégrée.
pub type Constante = fn() -> Decimal;

#[derive(Clone, Copy)]
pub enum Builtin {
    Function(Fonction),
    Constant(Constante),
}

/// Symbole résolu.
#[derive(Clone)]
pub enum Symbol {
    Function(Fonction),
    Constant(Decimal),
}

/* ------------------------ Constantes intégrées ------------------------ */

fn depuis_scaled(s: BigInt) -> Decimal {
    Decimal::from_rational(scaled_to_rational(s, PRECISION_CALCUL))
}

fn racine(x: &Decimal) -> Decimal {
    depuis_scaled(rational_sqrt_scaled(x.as_rational(), PRECISION_CALCUL))
}

fn pi() -> Decimal {
    depuis_scaled(pi_scaled_cached(PRECISION_CALCUL))
}

fn e() -> Decimal {
    static E: OnceLock<Decimal> = OnceLock::new();
    E.get_or_init(|| depuis_scaled(e_scaled_compute(PRECISION_CALCUL)))
        .clone()
}

fn phi() -> Decimal {
    static PHI: OnceLock<Decimal> = OnceLock::new();
    PHI.get_or_init(|| {
        let r5 = racine(&Decimal::from_integer(5));
        let deux = BigRational::from_integer(BigInt::from(2));
        Decimal::from_rational((BigRational::one() + r5.as_rational()) / deux)
    })
    .clone()
}

fn sqrt2() -> Decimal {
    racine(&Decimal::from_integer(2))
}

fn sqrte() -> Decimal {
    racine(&e())
}

fn sqrtpi() -> Decimal {
    racine(&pi())
}

fn sqrtphi() -> Decimal {
    racine(&phi())
}

/// Millimètres par pouce.
fn pouce() -> Decimal {
    Decimal::from_rational(BigRational::new(BigInt::from(254), BigInt::from(10)))
}

fn builtins() -> &'static HashMap<&'static str, Builtin> {
    static TABLE: OnceLock<HashMap<&'static str, Builtin>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let fonctions: [(&str, Fonction); 12] = [
            ("ln", trig::ln),
            ("abs", trig::abs),
            ("cos", trig::cos),
            ("sin", trig::sin),
            ("tan", trig::tan),
            ("acos", trig::acos),
            ("asin", trig::asin),
            ("atan", trig::atan),
            ("sqrt", trig::sqrt),
            ("cbrt", trig::cbrt),
            ("ceil", trig::ceil),
            ("floor", trig::floor),
        ];
        let constantes: [(&str, Constante); 9] = [
            ("e", e),
            ("pi", pi),
            ("π", pi),
            ("phi", phi),
            ("sqrt2", sqrt2),
            ("sqrte", sqrte),
            ("sqrtpi", sqrtpi),
            ("sqrtphi", sqrtphi),
            ("in", pouce),
        ];

        let mut m = HashMap::new();
        for (nom, f) in fonctions {
            m.insert(nom, Builtin::Function(f));
        }
        for (nom, c) in constantes {
            m.insert(nom, Builtin::Constant(c));
        }
        m
    })
}

/* ------------------------ Table ------------------------ */

#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    user: HashMap<String, Decimal>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ajoute ou remplace une constante utilisateur.
    pub fn add_constant(&mut self, name: &str, value: Decimal) {
        self.user.insert(name.to_string(), value);
    }

    pub fn user_constants(&self) -> impl Iterator<Item = (&str, &Decimal)> {
        self.user.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Classification d’un mot entier (une seule recherche).
    pub fn kind_of(&self, word: &str) -> Option<TokenKind> {
        if self.user.contains_key(word) {
            return Some(TokenKind::Constant);
        }
        match builtins().get(word)? {
            Builtin::Function(_) => Some(TokenKind::Function),
            Builtin::Constant(_) => Some(TokenKind::Constant),
        }
    }

    pub fn resolve(&self, name: &str) -> Option<Symbol> {
        if let Some(v) = self.user.get(name) {
            return Some(Symbol::Constant(v.clone()));
        }
        Some(match builtins().get(name)? {
            Builtin::Function(f) => Symbol::Function(*f),
            Builtin::Constant(c) => Symbol::Constant(c()),
        })
    }

    pub fn function(&self, name: &str) -> Option<Fonction> {
        match self.resolve(name)? {
            Symbol::Function(f) => Some(f),
            Symbol::Constant(_) => None,
        }
    }

    pub fn constant(&self, name: &str) -> Option<Decimal> {
        match self.resolve(name)? {
            Symbol::Constant(v) => Some(v),
            Symbol::Function(_) => None,
        }
    }

    /// Découpe un mot inconnu en noms connus, préfixe le plus long d’abord
    /// (`tantan` -> tan tan, `sinpi` -> sin pi). None si un reste ne se résout pas.
    ///
    /// Programmation dynamique de la fin vers le début : chaque position n’est
    /// examinée qu’une fois, et un morceau ne dépasse jamais le plus long nom connu.
    pub fn split_word(&self, word: &str) -> Option<Vec<(TokenKind, String)>> {
        let bornes: Vec<usize> = word
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(word.len()))
            .collect();
        let n = bornes.len() - 1;
        let max = self.longueur_max();

        // suite[i] = coupe retenue depuis la position i (fin du morceau, nature)
        let mut suite: Vec<Option<(usize, TokenKind)>> = vec![None; n + 1];
        let mut atteint = vec![false; n + 1];
        atteint[n] = true;

        for debut in (0..n).rev() {
            let plus_loin = (debut + max).min(n);
            for fin in (debut + 1..=plus_loin).rev() {
                if !atteint[fin] {
                    continue;
                }
                if let Some(kind) = self.kind_of(&word[bornes[debut]..bornes[fin]]) {
                    suite[debut] = Some((fin, kind));
                    atteint[debut] = true;
                    break;
                }
            }
        }

        if !atteint[0] {
            return None;
        }
        let mut out = Vec::new();
        let mut i = 0;
        while i < n {
            let (fin, kind) = suite[i]?;
            out.push((kind, word[bornes[i]..bornes[fin]].to_string()));
            i = fin;
        }
        Some(out)
    }

    /// Longueur (en caractères) du plus long nom connu.
    fn longueur_max(&self) -> usize {
        let user = self.user.keys().map(|k| k.chars().count());
        builtins()
            .keys()
            .map(|k| k.chars().count())
            .chain(user)
            .max()
            .unwrap_or(0)
    }
}

impl std::fmt::Debug for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Symbol::Function(_) => write!(f, "Function"),
            Symbol::Constant(v) => write!(f, "Constant({v})"),
        }
    }
}
