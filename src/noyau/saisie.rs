// src/noyau/saisie.rs
//
// Saisie brute (glyphes du pavé) -> texte analysable, et affichage groupé de l’entrée.

use super::format::grouper_milliers_decimal;
use super::jetons::{decouper, Tok};

/// Remplace les glyphes d’affichage par les symboles de l’analyse.
/// 'x' n’est PAS réécrit : c’est une lettre de variable valide.
pub fn normaliser_saisie(saisie: &str) -> String {
    saisie
        .replace('×', "*")
        .replace('÷', "/")
        .replace('%', "/100")
}

/// Littéraux ≥ 1000 groupés (1,234.5), au plus 3 décimales.
/// Un littéral hors de portée des f64 garde son texte d’origine.
/// Les blancs disparaissent : on recolle les jetons bruts (sans normalisation).
pub fn grouper_milliers(saisie: &str) -> String {
    decouper(saisie)
        .iter()
        .map(|tok| match tok {
            Tok::Num(texte) => match texte.parse::<f64>() {
                Ok(v) if v.is_finite() && v >= 1000.0 => {
                    grouper_milliers_decimal(&trois_decimales(v))
                }
                _ => texte.clone(),
            },
            autre => autre.to_string(),
        })
        .collect()
}

fn trois_decimales(v: f64) -> String {
    let s = format!("{v:.3}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}
