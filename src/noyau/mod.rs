//! Noyau flottant
//!
//! Organisation interne :
//! - classe.rs   : prédicats (flottant, variable, opérateur)
//! - jetons.rs   : tokenisation + fermeture des parenthèses + '*' implicites
//! - expr.rs     : arbre d’expression immuable
//! - analyse.rs  : descente récursive (primaire, unaire, multiplicatif, additif), arbre seul
//! - eval.rs     : parcours de l’arbre, `parse` vérifié + pipeline complet
//! - erreur.rs   : erreurs typées
//! - saisie.rs   : glyphes du pavé + groupement de l’entrée
//! - format.rs   : affichage du résultat (repli scientifique)

pub mod analyse;
pub mod classe;
pub mod erreur;
pub mod eval;
pub mod expr;
pub mod format;
pub mod jetons;
pub mod saisie;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use analyse::construire;
pub use classe::{is_float, is_float_or_variable, is_operator_symbol, is_variable};
pub use erreur::{ErreurCalc, Resultat};
pub use eval::{eval_expression, evaluer, parse, Evaluation, Valeur};
pub use expr::Expr;
pub use jetons::{tokenize, Tok};
