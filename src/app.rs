// src/app.rs
//
// Calculatrice flottante — module App (racine)
// --------------------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + console.rs)
// - Ré-exporter AppCalc (pour main.rs: use app::AppCalc;)
//
// Important:
// - etat.rs ne fait aucune évaluation ; c’est console.rs qui appelle le noyau.

pub mod console;
pub mod etat;

// Ré-export pratique : `use app::AppCalc;`
pub use etat::AppCalc;
