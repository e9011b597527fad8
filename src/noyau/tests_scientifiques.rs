//! Tests scientifiques (campagne) : propriétés du noyau de bout en bout.
//!
//! But : vérifier les garanties annoncées sans faire chauffer la machine.
//! - budget temps global
//! - tailles bornées (profondeur, longueur)
//!
//! Notes :
//! - Les variables sont reconnues mais jamais résolues : Valeur::NonResolue.
//! - Une division par un diviseur exactement nul est une erreur, pas ±∞/NaN.
//! - Les parenthèses ouvrantes non fermées sont fermées en fin de saisie.

use std::time::{Duration, Instant};

use super::eval::{eval_expression, Valeur};
use super::jetons::{decouper, format_tokens, tokenize, Tok};
use super::{construire, parse, ErreurCalc};

fn val_ok(expr: &str) -> Valeur {
    eval_expression(expr)
        .unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
        .valeur
}

fn assert_nombre(expr: &str, attendu: f64) {
    assert_eq!(val_ok(expr), Valeur::Nombre(attendu), "expr={expr:?}");
}

fn assert_non_resolue(expr: &str) {
    assert!(
        matches!(val_ok(expr), Valeur::NonResolue(_)),
        "valeur devrait être non résolue pour expr={expr:?}"
    );
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Précédence ------------------------ */

#[test]
fn sci_precedence() {
    assert_nombre("1+2*3", 7.0);
    assert_nombre("(1+2)*3", 9.0);
    assert_nombre("2*3+4*5", 26.0);
    assert_nombre("20/2/5", 2.0);
    assert_nombre("2-3-4", -5.0);
}

/* ------------------------ Multiplication implicite ------------------------ */

#[test]
fn sci_multiplication_implicite() {
    assert_nombre("2(3)", 6.0);
    assert_nombre("(2)(3)", 6.0);
    assert_nombre("(2)3", 6.0);
    // pas de priorité spéciale : 6/2*(1+2)
    assert_nombre("6/2(1+2)", 9.0);

    assert_non_resolue("2x");
    let ev = eval_expression("2x").unwrap();
    assert_eq!(ev.arbre.premiere_variable(), Some("x"));
}

/* ------------------------ Chaînes unaires ------------------------ */

#[test]
fn sci_chaines_unaires() {
    assert_nombre("--5", 5.0);
    assert_nombre("-+-5", 5.0);
    assert_nombre("+5", 5.0);
    assert_nombre("-(-(-2))", -2.0);
    assert_nombre("2*--3", 6.0);
}

/* ------------------------ Division ------------------------ */

#[test]
fn sci_division_par_zero() {
    assert_eq!(eval_expression("5/0").unwrap_err(), ErreurCalc::DivisionParZero);
    assert_eq!(eval_expression("1+(2/(3-3))").unwrap_err(), ErreurCalc::DivisionParZero);
    assert_nombre("0/5", 0.0);
    assert_eq!(parse("5/0").unwrap_err(), ErreurCalc::DivisionParZero);
    assert_eq!(parse("5/(2-2)").unwrap_err(), ErreurCalc::DivisionParZero);
    // l’arbre seul se construit sans erreur
    assert!(construire("5/0").is_ok());
}

/* ------------------------ Parenthèses ------------------------ */

#[test]
fn sci_fermeture_automatique() {
    assert_nombre("(1+2", 3.0);
    assert_nombre("((2*(3", 6.0);
    assert_nombre("2(1+1", 4.0);
}

#[test]
fn sci_fermetures_ajoutees_exactement_k() {
    for k in 0..12usize {
        let s = format!("{}1{}", "(".repeat(k + 2), ")".repeat(2));
        let bruts = decouper(&s).len();
        let jetons = tokenize(&s).unwrap();
        assert_eq!(jetons.len(), bruts + k, "s={s:?}");
        assert!(jetons[bruts..].iter().all(|t| *t == Tok::RPar));
    }
}

#[test]
fn sci_trop_de_fermantes() {
    for s in [")", "1)", "(1))", "())"] {
        assert!(
            matches!(
                tokenize(s),
                Err(ErreurCalc::ParenthesesOuvrantesManquantes { .. })
            ),
            "s={s:?}"
        );
    }
    // ")(" : total nul, donc c’est l’analyse qui échoue
    assert!(matches!(
        eval_expression(")("),
        Err(ErreurCalc::JetonInattendu { .. })
    ));
}

/* ------------------------ Rejets ------------------------ */

#[test]
fn sci_jetons_restants() {
    match eval_expression("1 2") {
        Err(ErreurCalc::JetonsRestants { jeton, position }) => {
            assert_eq!(jeton, "2");
            assert_eq!(position, 1);
        }
        autre => panic!("attendu JetonsRestants, obtenu {autre:?}"),
    }
}

#[test]
fn sci_entree_vide() {
    assert!(tokenize("").unwrap().is_empty());
    let e = eval_expression("").unwrap_err();
    assert!(e.to_string().starts_with("attendu : un nombre, une variable ou une parenthèse"));
}

/* ------------------------ Normalisation ------------------------ */

#[test]
fn sci_idempotence_normalisation() {
    for s in ["1+2*3", "2(3)", "(1+(2", "x(y)(z)", "-.5(2)3", "4/(2"] {
        let une = tokenize(s).unwrap();
        let deux = tokenize(&format_tokens(&une)).unwrap();
        assert_eq!(une, deux, "s={s:?}");
    }
}

/* ------------------------ Stress contrôlé (sans brûler) ------------------------ */

#[test]
fn sci_stress_somme_longue() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let mut expr = String::new();
    for k in 0..100_000 {
        if k > 0 {
            expr.push_str(" + ");
        }
        expr.push_str("0.5");
        budget(t0, max);
    }

    // 100 000 termes sur une ligne : arbre profond à gauche, parcouru sans récursion
    assert_nombre(&expr, 50_000.0);
}

#[test]
fn sci_stress_imbrication_bornee() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    // 200 niveaux, fermetures toutes implicites
    let expr = format!("{}7", "(".repeat(200));
    budget(t0, max);
    assert_nombre(&expr, 7.0);

    // au-delà de la borne : erreur typée, jamais d’abandon du processus
    let expr = format!("{}7", "(".repeat(100_000));
    assert!(matches!(
        eval_expression(&expr),
        Err(ErreurCalc::ImbricationTropProfonde { limite: 256, .. })
    ));
}
