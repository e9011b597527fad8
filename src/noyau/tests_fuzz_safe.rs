//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - toute erreur doit appartenir à la taxonomie connue (jamais de panique)
//! - invariants : k '(' non fermées => k ')' ajoutées ; normalisation idempotente

use std::time::{Duration, Instant};

use super::erreur::ErreurCalc;
use super::eval::eval_expression;
use super::jetons::{decouper, format_tokens, tokenize, Tok};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Helpers fuzz ------------------------ */

fn is_erreur_attendue(e: &ErreurCalc) -> bool {
    // Liste blanche : le littéral invalide ne doit jamais sortir du lexer.
    !matches!(e, ErreurCalc::LitteralInvalide(_))
}

/* ------------------------ Génération (bornée) ------------------------ */

fn gen_nombre(rng: &mut Rng) -> String {
    let n = rng.pick(10);
    match rng.pick(4) {
        0 => format!("{n}.5"),
        1 => format!(".{n}"),
        _ => format!("{n}"),
    }
}

fn gen_atome(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 => "x".to_string(),
        1 => "0".to_string(),
        _ => gen_nombre(rng),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atome(rng);
    }

    let a = gen_expr(rng, depth - 1);
    match rng.pick(8) {
        0 => gen_atome(rng),
        1 => format!("{a}+{}", gen_expr(rng, depth - 1)),
        2 => format!("{a}-{}", gen_expr(rng, depth - 1)),
        3 => format!("{a}*{}", gen_expr(rng, depth - 1)),
        4 => format!("{a}/{}", gen_expr(rng, depth - 1)),
        5 => format!("-{a}"),
        // parenthèse parfois laissée ouverte (fermeture automatique)
        6 => {
            if rng.coin() {
                format!("({a})")
            } else {
                format!("({a}")
            }
        }
        // juxtaposition
        _ => format!("{}({a})", gen_atome(rng)),
    }
}

/// Bruit : caractères quelconques, pour vérifier l’absence de panique.
fn gen_bruit(rng: &mut Rng, len: usize) -> String {
    const ALPHABET: &[char] = &[
        '1', '2', '.', '+', '-', '*', '/', '(', ')', ' ', 'x', 'y', '^', '%', '=', 'é',
    ];
    (0..len)
        .map(|_| ALPHABET[rng.pick(ALPHABET.len() as u32) as usize])
        .collect()
}

fn solde_parentheses(s: &str) -> i64 {
    decouper(s).iter().fold(0i64, |acc, t| match t {
        Tok::LPar => acc + 1,
        Tok::RPar => acc - 1,
        _ => acc,
    })
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_determinisme_et_taxonomie() {
    let t0 = Instant::now();
    let max = Duration::from_millis(250);

    // Même seed => mêmes expressions => mêmes sorties (déterminisme)
    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..200 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);

        let premier = eval_expression(&expr);
        let second = eval_expression(&expr);

        match (&premier, &second) {
            (Ok(a), Ok(b)) => {
                assert_eq!(a.arbre, b.arbre, "expr={expr:?}");
                seen_ok += 1;
            }
            (Err(a), Err(b)) => {
                assert_eq!(a, b, "expr={expr:?}");
                assert!(
                    is_erreur_attendue(a),
                    "erreur non attendue: expr={expr:?} err={a}"
                );
                seen_err += 1;
            }
            _ => panic!("résultats divergents pour expr={expr:?}"),
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 20, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_bruit_sans_panique() {
    let t0 = Instant::now();
    let max = Duration::from_millis(250);

    let mut rng = Rng::new(0xBADC0DE_u64);

    for _ in 0..300 {
        budget(t0, max);

        let len = rng.pick(16) as usize;
        let s = gen_bruit(&mut rng, len);

        if let Err(e) = eval_expression(&s) {
            assert!(is_erreur_attendue(&e), "erreur non attendue: s={s:?} err={e}");
        }
    }
}

#[test]
fn fuzz_safe_fermetures_et_idempotence() {
    let t0 = Instant::now();
    let max = Duration::from_millis(250);

    let mut rng = Rng::new(0x5EED_u64);

    for _ in 0..300 {
        budget(t0, max);

        let len = rng.pick(20) as usize;
        let s = gen_bruit(&mut rng, len);
        let solde = solde_parentheses(&s);

        match tokenize(&s) {
            Ok(jetons) => {
                assert!(solde >= 0, "s={s:?}");
                // exactement k ')' en fin de séquence (avant les '*' éventuels qui ne suivent jamais)
                let k = solde as usize;
                assert!(
                    jetons.iter().rev().take(k).all(|t| *t == Tok::RPar),
                    "s={s:?} jetons={}",
                    format_tokens(&jetons)
                );

                let encore = tokenize(&format_tokens(&jetons)).unwrap();
                assert_eq!(jetons, encore, "s={s:?}");
            }
            Err(e) => {
                assert!(solde < 0, "s={s:?}");
                assert!(matches!(e, ErreurCalc::ParenthesesOuvrantesManquantes { .. }));
            }
        }
    }
}
