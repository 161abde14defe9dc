// src/noyau/erreurs.rs
//
// Taxonomie des erreurs du noyau.
// Aucune étape ne panique : chaque étape retourne Result<_, CalcError>
// et seule la session replie l’erreur dans le Resultat.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalcError {
    /// La pile de valeurs ne contient pas exactement une valeur à la fin.
    #[error("expression invalide")]
    InvalidExpression,

    #[error("symbole inconnu: '{0}'")]
    UnresolvedSymbol(String),

    #[error("nombre invalide: '{0}'")]
    NumericParseFailure(String),

    #[error("caractère inattendu: '{0}'")]
    MalformedCharacter(char),

    #[error("division par zéro")]
    DivisionByZero,

    /// Hors domaine (ln(-1), sqrt(-1), asin(2), débordement double).
    #[error("résultat indéfini: {0}")]
    UndefinedResult(String),
}
