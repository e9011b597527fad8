// src/noyau/expr.rs
//
// Arbre d’expression (immuable une fois construit).
// - FloatLiteral : feuille numérique
// - Variable     : feuille symbolique, jamais résolue
// - Unary        : chaîne de signes réduite à ±1
// - Binary       : + - * /
//
// Chaque parent possède ses enfants (Box), ni partage ni cycle.
// Les parenthèses ne créent pas de nœud : elles ne font que grouper.
// L’évaluation vit ailleurs (eval.rs).
//
// Une somme de n termes donne un arbre de profondeur n (pliage à gauche) :
// parcours, affichage et libération passent par une pile explicite.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Signe {
    Plus,
    Moins,
}

impl Signe {
    /// Signe net d’une chaîne de +/- : impair en '-' => Moins.
    pub fn depuis_nb_moins(nb_moins: usize) -> Signe {
        if nb_moins % 2 == 0 {
            Signe::Plus
        } else {
            Signe::Moins
        }
    }

    pub fn facteur(self) -> f64 {
        match self {
            Signe::Plus => 1.0,
            Signe::Moins => -1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpBinaire {
    Add,
    Sub,
    Mul,
    Div,
}

impl OpBinaire {
    pub fn symbole(self) -> char {
        match self {
            OpBinaire::Add => '+',
            OpBinaire::Sub => '-',
            OpBinaire::Mul => '*',
            OpBinaire::Div => '/',
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum Expr {
    FloatLiteral(f64),
    Variable(String),

    Unary {
        signe: Signe,
        operande: Box<Expr>,
    },

    Binary {
        op: OpBinaire,
        gauche: Box<Expr>,
        droite: Box<Expr>,
    },
}

impl Expr {
    pub fn unary(signe: Signe, operande: Expr) -> Expr {
        Expr::Unary {
            signe,
            operande: Box::new(operande),
        }
    }

    pub fn binary(op: OpBinaire, gauche: Expr, droite: Expr) -> Expr {
        Expr::Binary {
            op,
            gauche: Box::new(gauche),
            droite: Box::new(droite),
        }
    }

    /// Première variable rencontrée (parcours gauche -> droite).
    pub fn premiere_variable(&self) -> Option<&str> {
        let mut pile = vec![self];

        while let Some(expr) = pile.pop() {
            match expr {
                Expr::FloatLiteral(_) => {}
                Expr::Variable(id) => return Some(id),
                Expr::Unary { operande, .. } => pile.push(operande),
                Expr::Binary { gauche, droite, .. } => {
                    pile.push(droite);
                    pile.push(gauche);
                }
            }
        }
        None
    }
}

/* ------------------------ Libération sans récursion ------------------------ */

impl Drop for Expr {
    fn drop(&mut self) {
        let mut pile = Vec::new();
        detacher_enfants(self, &mut pile);

        // chaque nœud dépilé part avec des enfants déjà détachés (feuilles)
        while let Some(mut expr) = pile.pop() {
            detacher_enfants(&mut expr, &mut pile);
        }
    }
}

fn detacher_enfants(expr: &mut Expr, pile: &mut Vec<Expr>) {
    match expr {
        Expr::FloatLiteral(_) | Expr::Variable(_) => {}
        Expr::Unary { operande, .. } => detacher(operande, pile),
        Expr::Binary { gauche, droite, .. } => {
            detacher(gauche, pile);
            detacher(droite, pile);
        }
    }
}

fn detacher(enfant: &mut Expr, pile: &mut Vec<Expr>) {
    if matches!(enfant, Expr::Unary { .. } | Expr::Binary { .. }) {
        pile.push(std::mem::replace(enfant, Expr::FloatLiteral(0.0)));
    }
}

/* ------------------------ Affichage ------------------------ */

enum Morceau<'a> {
    Noeud(&'a Expr),
    Operateur(OpBinaire),
    Fermer,
}

/// Forme entièrement parenthésée (démarche) : ((1 + 2) * -3)
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pile = vec![Morceau::Noeud(self)];

        while let Some(morceau) = pile.pop() {
            match morceau {
                Morceau::Noeud(Expr::FloatLiteral(v)) => write!(f, "{v}")?,
                Morceau::Noeud(Expr::Variable(id)) => f.write_str(id)?,
                Morceau::Noeud(Expr::Unary { signe, operande }) => {
                    f.write_str(match signe {
                        Signe::Plus => "+",
                        Signe::Moins => "-",
                    })?;
                    pile.push(Morceau::Noeud(operande));
                }
                Morceau::Noeud(Expr::Binary { op, gauche, droite }) => {
                    f.write_str("(")?;
                    pile.push(Morceau::Fermer);
                    pile.push(Morceau::Noeud(droite));
                    pile.push(Morceau::Operateur(*op));
                    pile.push(Morceau::Noeud(gauche));
                }
                Morceau::Operateur(op) => write!(f, " {} ", op.symbole())?,
                Morceau::Fermer => f.write_str(")")?,
            }
        }
        Ok(())
    }
}
