// src/noyau/jetons.rs
//
// Scanner paresseux : texte -> suite finie de jetons, terminée par End.
// Un scanner ne se relance pas : en construire un par chaîne.
//
// - nombres : chiffres, un point par composante, unités d/°, '/m, "/s
//   (une unité n’est absorbée que si le caractère suivant n’est PAS une lettre,
//   sinon `5sin90` perdrait son `s`)
// - mots : suite de lettres, recherche unique dans la table, puis découpage
//   en noms connus (`tantan` -> tan tan) ; sinon jeton Error
// - le texte d’un jeton Number est toujours un décimal canonique

use std::collections::VecDeque;
use std::fmt;

use log::trace;

use super::dms::{deg_to_decimal, est_unite};
use super::symboles::SymbolTable;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Number,
    Function,
    Constant,
    Operator,
    LParen,
    RParen,
    Whitespace,
    End,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Token {
            kind,
            text: text.into(),
        }
    }

    pub fn number(text: impl Into<String>) -> Self {
        Token::new(TokenKind::Number, text)
    }

    pub fn operator(symbole: char) -> Self {
        Token::new(TokenKind::Operator, symbole.to_string())
    }

    /// Jeton qui produit une valeur (nombre ou constante).
    pub fn is_value(&self) -> bool {
        matches!(self.kind, TokenKind::Number | TokenKind::Constant)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

pub fn is_operator(c: char) -> bool {
    matches!(c, '+' | '-' | '*' | '/' | '^')
}

fn is_number_start(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}

pub struct Scanner<'a> {
    chars: Vec<char>,
    pos: usize,
    symbols: &'a SymbolTable,
    // jetons déjà produits par un découpage de mot
    pending: VecDeque<Token>,
    done: bool,
    saw_angle_literal: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(text: &str, symbols: &'a SymbolTable) -> Self {
        Scanner {
            chars: text.chars().collect(),
            pos: 0,
            symbols,
            pending: VecDeque::new(),
            done: false,
            saw_angle_literal: false,
        }
    }

    /// Vrai si un littéral lu jusqu’ici portait une unité d’angle.
    pub fn saw_angle_literal(&self) -> bool {
        self.saw_angle_literal
    }

    fn peek(&self, ahead: usize) -> Option<char> {
        self.chars.get(self.pos + ahead).copied()
    }

    fn scan(&mut self) -> Token {
        let c = match self.peek(0) {
            Some(c) => c,
            None => return Token::new(TokenKind::End, ""),
        };

        if is_number_start(c) {
            return self.scan_number();
        }
        if c.is_alphabetic() {
            return self.scan_word();
        }
        if c.is_whitespace() {
            return self.scan_whitespace();
        }

        self.pos += 1;
        match c {
            '(' => Token::new(TokenKind::LParen, "("),
            ')' => Token::new(TokenKind::RParen, ")"),
            // Racine carrée unicode : √  => sqrt
            '√' => Token::new(TokenKind::Function, "sqrt"),
            c if is_operator(c) => Token::operator(c),
            c => Token::new(TokenKind::Error, c.to_string()),
        }
    }

    fn scan_number(&mut self) -> Token {
        let start = self.pos;
        let mut point = false;
        let mut malforme = false;
        let mut unite = false;

        while let Some(c) = self.peek(0) {
            if c.is_ascii_digit() {
                self.pos += 1;
            } else if c == '.' {
                // un seul point par composante (45d20.5' est valide)
                malforme |= point;
                point = true;
                self.pos += 1;
            } else if est_unite(c) {
                if self.peek(1).is_some_and(char::is_alphabetic) {
                    break;
                }
                self.pos += 1;
                point = false;
                unite = true;
            } else {
                break;
            }
        }

        let brut: String = self.chars[start..self.pos].iter().collect();
        if malforme {
            return Token::new(TokenKind::Error, brut);
        }

        match deg_to_decimal(&brut) {
            Ok(v) => {
                self.saw_angle_literal |= unite;
                Token::number(v.to_text())
            }
            Err(_) => Token::new(TokenKind::Error, brut),
        }
    }

    fn scan_word(&mut self) -> Token {
        let start = self.pos;
        while self.peek(0).is_some_and(char::is_alphabetic) {
            self.pos += 1;
        }
        let word: String = self.chars[start..self.pos].iter().collect();

        if let Some(kind) = self.symbols.kind_of(&word) {
            return Token::new(kind, word);
        }

        match self.symbols.split_word(&word) {
            Some(parts) => {
                trace!("mot {word:?} découpé en {} symboles", parts.len());
                self.pending
                    .extend(parts.into_iter().map(|(kind, text)| Token::new(kind, text)));
                self.pending
                    .pop_front()
                    .unwrap_or_else(|| Token::new(TokenKind::Error, word))
            }
            None => Token::new(TokenKind::Error, word),
        }
    }

    fn scan_whitespace(&mut self) -> Token {
        let start = self.pos;
        while self.peek(0).is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        Token::new(
            TokenKind::Whitespace,
            self.chars[start..self.pos].iter().collect::<String>(),
        )
    }
}

impl Iterator for Scanner<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if let Some(t) = self.pending.pop_front() {
            return Some(t);
        }
        if self.done {
            return None;
        }

        let t = self.scan();
        if t.kind == TokenKind::End {
            self.done = true;
        }
        Some(t)
    }
}

impl std::iter::FusedIterator for Scanner<'_> {}

/// Format utilitaire (debug/journal) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .filter(|t| t.kind != TokenKind::End)
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
