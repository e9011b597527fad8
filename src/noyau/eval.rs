//! Noyau — évaluation (pipeline réel)
//!
//! tokenize -> analyse (Expr) -> évaluation (parcours de l’arbre)
//!
//! Remarque : l’arbre ne porte aucune valeur ; on le parcourt après coup.
//! Une variable ne se résout jamais : la valeur devient `Valeur::NonResolue`
//! et se propage (ce n’est pas une erreur).
//!
//! Le parcours est itératif (pile de tâches) : la profondeur de l’arbre
//! suit le nombre de termes, pas l’imbrication des parenthèses.

use super::analyse::{construire, parse_jetons};
use super::erreur::{ErreurCalc, Resultat};
use super::expr::{Expr, OpBinaire, Signe};
use super::jetons::{format_tokens, tokenize};

#[derive(Clone, Debug, PartialEq)]
pub enum Valeur {
    Nombre(f64),
    /// Porte l’identifiant de la première variable rencontrée.
    NonResolue(String),
}

impl Valeur {
    pub fn nombre(&self) -> Option<f64> {
        match self {
            Valeur::Nombre(v) => Some(*v),
            Valeur::NonResolue(_) => None,
        }
    }
}

#[derive(Default, Clone, Debug)]
pub struct DemarcheNoyau {
    pub jetons: String,
    pub arbre: String,
}

#[derive(Debug)]
pub struct Evaluation {
    pub arbre: Expr,
    pub valeur: Valeur,
    pub demarche: DemarcheNoyau,
}

enum Tache<'a> {
    Visiter(&'a Expr),
    Signer(Signe),
    Combiner(OpBinaire),
}

/// Parcours de l’arbre (post-ordre, pile explicite).
/// Les deux côtés d’un nœud binaire sont évalués (gauche d’abord) avant de combiner :
/// un diviseur exactement nul est refusé même si la gauche est non résolue.
pub fn evaluer(expr: &Expr) -> Resultat<Valeur> {
    let mut taches = vec![Tache::Visiter(expr)];
    let mut valeurs: Vec<Valeur> = Vec::new();

    while let Some(tache) = taches.pop() {
        match tache {
            Tache::Visiter(Expr::FloatLiteral(v)) => valeurs.push(Valeur::Nombre(*v)),
            Tache::Visiter(Expr::Variable(id)) => valeurs.push(Valeur::NonResolue(id.clone())),
            Tache::Visiter(Expr::Unary { signe, operande }) => {
                taches.push(Tache::Signer(*signe));
                taches.push(Tache::Visiter(operande));
            }
            Tache::Visiter(Expr::Binary { op, gauche, droite }) => {
                taches.push(Tache::Combiner(*op));
                taches.push(Tache::Visiter(droite));
                taches.push(Tache::Visiter(gauche));
            }

            Tache::Signer(signe) => {
                let v = depiler(&mut valeurs);
                valeurs.push(match v {
                    Valeur::Nombre(v) => Valeur::Nombre(signe.facteur() * v),
                    nr => nr,
                });
            }

            Tache::Combiner(op) => {
                let d = depiler(&mut valeurs);
                let g = depiler(&mut valeurs);

                if op == OpBinaire::Div && d == Valeur::Nombre(0.0) {
                    return Err(ErreurCalc::DivisionParZero);
                }

                valeurs.push(match (g, d) {
                    (Valeur::Nombre(a), Valeur::Nombre(b)) => Valeur::Nombre(applique(op, a, b)),
                    (nr @ Valeur::NonResolue(_), _) | (_, nr @ Valeur::NonResolue(_)) => nr,
                });
            }
        }
    }

    Ok(depiler(&mut valeurs))
}

/// Chaque tâche Signer/Combiner suit la visite de ses opérandes.
fn depiler(valeurs: &mut Vec<Valeur>) -> Valeur {
    match valeurs.pop() {
        Some(v) => v,
        None => unreachable!("pile de valeurs vide : tâches mal ordonnées"),
    }
}

fn applique(op: OpBinaire, a: f64, b: f64) -> f64 {
    match op {
        OpBinaire::Add => a + b,
        OpBinaire::Sub => a - b,
        OpBinaire::Mul => a * b,
        OpBinaire::Div => a / b,
    }
}

impl Expr {
    pub fn valeur(&self) -> Resultat<Valeur> {
        evaluer(self)
    }
}

/// Point d’entrée « analyse » : construit l’arbre puis le vérifie par évaluation.
/// Une division par zéro échoue ici ; l’arbre rendu donne sa valeur via `valeur()`.
pub fn parse(code: &str) -> Resultat<Expr> {
    let arbre = construire(code)?;
    evaluer(&arbre)?;
    Ok(arbre)
}

/// API publique : tokenize + analyse + évaluation, avec la démarche (jetons, arbre).
pub fn eval_expression(code: &str) -> Resultat<Evaluation> {
    let jetons = tokenize(code)?;
    let arbre = parse_jetons(&jetons)?;
    let valeur = evaluer(&arbre)?;

    log::debug!("{code:?} => {valeur:?}");

    let demarche = DemarcheNoyau {
        jetons: format_tokens(&jetons),
        arbre: arbre.to_string(),
    };

    Ok(Evaluation {
        arbre,
        valeur,
        demarche,
    })
}
