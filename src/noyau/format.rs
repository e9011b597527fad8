// src/noyau/format.rs
//
// Affichage du résultat (largeur bornée, en caractères).
// Décimal groupé d’abord ; s’il déborde, notation scientifique
// avec le plus de chiffres possible.

use super::eval::Valeur;

/// Chiffres après la virgule au départ du repli scientifique.
pub const CHIFFRES_MAX: usize = 20;

/* ------------------------ Groupement des milliers ------------------------ */

/// "-1234567.25" -> "-1,234,567.25" (seule la partie entière est groupée).
pub(crate) fn grouper_milliers_decimal(decimal: &str) -> String {
    let (signe, reste) = match decimal.strip_prefix('-') {
        Some(r) => ("-", r),
        None => ("", decimal),
    };
    let (entier, frac) = match reste.split_once('.') {
        Some((e, f)) => (e, Some(f)),
        None => (reste, None),
    };

    let n = entier.len();
    let mut out = String::with_capacity(decimal.len() + n / 3);
    out.push_str(signe);
    for (i, c) in entier.chars().enumerate() {
        if i > 0 && (n - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if let Some(f) = frac {
        out.push('.');
        out.push_str(f);
    }
    out
}

/* ------------------------ Résultat ------------------------ */

pub fn format_resultat(valeur: f64, largeur: usize) -> String {
    if valeur.is_nan() {
        return "NaN".to_string();
    }
    if valeur.is_infinite() {
        return if valeur > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let decimal = grouper_milliers_decimal(&format!("{valeur}"));
    if decimal.chars().count() <= largeur {
        return decimal;
    }

    // repli : 20 chiffres, puis on en retire tant que ça déborde
    let mut chiffres = CHIFFRES_MAX;
    loop {
        let sci = format!("{valeur:.chiffres$e}");
        if sci.chars().count() <= largeur || chiffres == 0 {
            return sci;
        }
        chiffres -= 1;
    }
}

/// Valeur non résolue : on affiche la variable en cause.
pub fn format_valeur(valeur: &Valeur, largeur: usize) -> String {
    match valeur {
        Valeur::Nombre(v) => format_resultat(*v, largeur),
        Valeur::NonResolue(id) => format!("?{id}"),
    }
}
