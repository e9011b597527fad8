// src/noyau/jetons.rs

use std::borrow::Cow;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use super::classe::{is_float, is_float_or_variable, is_variable, MOTIF_FLOTTANT, MOTIF_VARIABLE};
use super::erreur::{ErreurCalc, Resultat};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tok {
    // Littéral gardé tel que saisi (la conversion f64 se fait à l’analyse)
    Num(String),
    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,

    LPar,
    RPar,

    // Tout autre caractère non blanc, passé tel quel (l’analyse le refusera)
    Autre(char),
}

impl Tok {
    /// Classe un lexème (priorité : identifiant, flottant, symbole).
    fn depuis_lexeme(lexeme: &str) -> Tok {
        if is_variable(Some(lexeme)) {
            return Tok::Ident(lexeme.to_string());
        }
        if is_float(Some(lexeme)) {
            return Tok::Num(lexeme.to_string());
        }

        let mut chars = lexeme.chars();
        match (chars.next(), chars.next()) {
            (Some('+'), None) => Tok::Plus,
            (Some('-'), None) => Tok::Minus,
            (Some('*'), None) => Tok::Star,
            (Some('/'), None) => Tok::Slash,
            (Some('('), None) => Tok::LPar,
            (Some(')'), None) => Tok::RPar,
            (Some(c), None) => Tok::Autre(c),
            // le motif de lexing ne produit pas d’autre forme
            _ => Tok::Autre(char::REPLACEMENT_CHARACTER),
        }
    }

    pub fn texte(&self) -> Cow<'_, str> {
        match self {
            Tok::Num(s) | Tok::Ident(s) => Cow::Borrowed(s.as_str()),
            Tok::Plus => Cow::Borrowed("+"),
            Tok::Minus => Cow::Borrowed("-"),
            Tok::Star => Cow::Borrowed("*"),
            Tok::Slash => Cow::Borrowed("/"),
            Tok::LPar => Cow::Borrowed("("),
            Tok::RPar => Cow::Borrowed(")"),
            Tok::Autre(c) => Cow::Owned(c.to_string()),
        }
    }

    fn est_float_ou_variable(&self) -> bool {
        is_float_or_variable(Some(self.texte().as_ref()))
    }
}

impl fmt::Display for Tok {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.texte())
    }
}

/* ------------------------ Étape 1 : lexing ------------------------ */

// identifiant | flottant | un caractère non blanc
static RE_LEXEME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"{MOTIF_VARIABLE}|{MOTIF_FLOTTANT}|\S")).expect("motif lexème")
});

/// Découpe brute, sans normalisation. Jamais d’erreur : entrée vide => vecteur vide.
pub fn decouper(s: &str) -> Vec<Tok> {
    RE_LEXEME
        .find_iter(s)
        .map(|m| Tok::depuis_lexeme(m.as_str()))
        .collect()
}

/* ------------------------ Étape 2 : équilibrage ------------------------ */

/// Ajoute en fin autant de ')' qu’il manque.
/// Seul le total compte (pas le cumul en cours de lecture).
fn equilibrer_parentheses(mut jetons: Vec<Tok>) -> Resultat<Vec<Tok>> {
    let ouvrantes = jetons.iter().filter(|t| **t == Tok::LPar).count();
    let fermantes = jetons.iter().filter(|t| **t == Tok::RPar).count();

    if fermantes > ouvrantes {
        return Err(ErreurCalc::ParenthesesOuvrantesManquantes {
            ouvrantes,
            fermantes,
        });
    }

    let manquantes = ouvrantes - fermantes;
    if manquantes > 0 {
        log::trace!("équilibrage : {manquantes} ')' ajoutée(s)");
        jetons.extend(std::iter::repeat(Tok::RPar).take(manquantes));
    }
    Ok(jetons)
}

/* ------------------------ Étape 3 : multiplication implicite ------------------------ */

fn multiplication_implicite(courant: &Tok, suivant: &Tok) -> bool {
    match (courant, suivant) {
        (Tok::RPar, Tok::LPar) => true,
        (c, Tok::LPar) => c.est_float_ou_variable(),
        (Tok::RPar, s) => s.est_float_ou_variable(),
        // juxtaposition nombre-variable : 2x
        (Tok::Num(_), Tok::Ident(_)) => true,
        _ => false,
    }
}

/// Une seule passe sur les paires d’origine : un '*' inséré ne redéclenche rien.
fn inserer_multiplications(jetons: &[Tok]) -> Vec<Tok> {
    let mut out = Vec::with_capacity(jetons.len() * 2);

    for (i, tok) in jetons.iter().enumerate() {
        out.push(tok.clone());
        if let Some(suivant) = jetons.get(i + 1) {
            if multiplication_implicite(tok, suivant) {
                out.push(Tok::Star);
            }
        }
    }
    out
}

/* ------------------------ API ------------------------ */

/// Tokenize une chaîne : lexing, puis fermeture des parenthèses, puis '*' implicites.
/// Seule erreur possible : plus de ')' que de '(' au total.
pub fn tokenize(s: &str) -> Resultat<Vec<Tok>> {
    let bruts = decouper(s);
    let equilibres = equilibrer_parentheses(bruts)?;
    let jetons = inserer_multiplications(&equilibres);

    log::trace!("jetons {s:?} -> [{}]", format_tokens(&jetons));
    Ok(jetons)
}

/// Format utilitaire (trace/“démarche”) : jetons séparés par des espaces.
pub fn format_tokens(tokens: &[Tok]) -> String {
    tokens
        .iter()
        .map(|t| t.texte())
        .collect::<Vec<_>>()
        .join(" ")
}
