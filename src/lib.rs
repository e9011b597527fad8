// src/lib.rs
//
// Calculatrice flottante — bibliothèque (noyau seulement).
// Le front-end terminal vit dans main.rs + app/.

pub mod noyau;

pub use noyau::{eval_expression, parse, tokenize, ErreurCalc, Expr, Valeur};
