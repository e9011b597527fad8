// src/noyau/classe.rs
//
// Classifieur : prédicats purs sur un jeton (texte).
// Totaux sur Option<&str> : None (au-delà de la fin) => false.

use regex::Regex;
use std::sync::LazyLock;

/// Littéral flottant : chiffres optionnels + '.' optionnel + au moins un chiffre.
pub(crate) const MOTIF_FLOTTANT: &str = r"([0-9]*[.])?[0-9]+";

/// Identifiant : une ou plusieurs lettres ASCII.
pub(crate) const MOTIF_VARIABLE: &str = r"[A-Za-z]+";

static RE_FLOTTANT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("^{MOTIF_FLOTTANT}$")).expect("motif flottant"));

static RE_VARIABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("^{MOTIF_VARIABLE}$")).expect("motif variable"));

/// Glyphes d’opérateurs tels qu’affichés (ASCII + symboles de pavé).
const SYMBOLES_OPERATEURS: &str = "+-*/×÷";

pub fn is_float(token: Option<&str>) -> bool {
    token.is_some_and(|t| RE_FLOTTANT.is_match(t))
}

pub fn is_variable(token: Option<&str>) -> bool {
    token.is_some_and(|t| RE_VARIABLE.is_match(t))
}

pub fn is_float_or_variable(token: Option<&str>) -> bool {
    is_float(token) || is_variable(token)
}

/// Un seul caractère d’opérateur (addition, soustraction, multiplication, division).
pub fn is_operator_symbol(c: char) -> bool {
    SYMBOLES_OPERATEURS.contains(c)
}
