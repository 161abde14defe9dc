//! Calculatrice DMS — évaluateur d’expressions arithmétiques exact
//!
//! Pipeline (un seul fil, une expression à la fois) :
//! texte -> jetons (unités d/°, '/m, "/s) -> analyse (multiplication implicite)
//! -> `ans` injecté -> shunting-yard -> postfix -> Decimal -> rendu
//!
//! Rendu : décimal minimal avec période surlignée, notation ingénieur,
//! ou degrés/minutes/secondes.
//!
//! ```
//! use calculatrice_dms::Session;
//!
//! let mut s = Session::new();
//! assert_eq!(s.evaluate("5(5)").to_string(), "25");
//! assert_eq!(s.evaluate("*2").to_string(), "50");
//! ```

pub mod noyau;
pub mod session;

pub use noyau::decimal::Decimal;
pub use noyau::dms::deg_to_decimal;
pub use noyau::erreurs::CalcError;
pub use noyau::format::format_recurring;
pub use noyau::jetons::{Scanner, Token, TokenKind};
pub use noyau::symboles::SymbolTable;
pub use session::{Resultat, Session};
