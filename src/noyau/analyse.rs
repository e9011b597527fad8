// src/noyau/analyse.rs
//
// Descente récursive -> Expr (sans évaluer).
//
// Grammaire (du plus lié au moins lié) :
//   primaire       := Num | Ident | ('+'|'-') unaire | '(' additif ')'
//   unaire         := ('+'|'-')* primaire
//   multiplicatif  := primaire (('*'|'/') primaire)*
//   additif        := multiplicatif (('+'|'-') multiplicatif)*
//
// L’état (jetons + curseur) vit dans un Analyseur propre à chaque appel :
// pas d’état partagé, donc réentrant.
//
// Seules les parenthèses font descendre la pile d’appels : leur imbrication
// est bornée (PROFONDEUR_MAX). Les chaînes + - * / restent des boucles.

use super::erreur::{ErreurCalc, Resultat};
use super::expr::{Expr, OpBinaire, Signe};
use super::jetons::{tokenize, Tok};

/// Imbrication maximale de parenthèses.
pub const PROFONDEUR_MAX: usize = 256;

pub struct Analyseur<'a> {
    jetons: &'a [Tok],
    position: usize,
    profondeur: usize,
}

impl<'a> Analyseur<'a> {
    pub fn new(jetons: &'a [Tok]) -> Self {
        Self {
            jetons,
            position: 0,
            profondeur: 0,
        }
    }

    /// Curseur : index du prochain jeton à lire.
    pub fn position(&self) -> usize {
        self.position
    }

    fn peek(&self) -> Option<&'a Tok> {
        self.jetons.get(self.position)
    }

    /// Avance d’un jeton. L’appelant annonce ce qu’il consomme :
    /// un désaccord est un bug interne, jamais une faute de saisie.
    fn advance(&mut self, attendu: &Tok) {
        debug_assert_eq!(
            self.peek(),
            Some(attendu),
            "consommation incohérente en position {}",
            self.position
        );
        self.position += 1;
    }

    fn inattendu(&self) -> ErreurCalc {
        ErreurCalc::JetonInattendu {
            jeton: self.peek().map(|t| t.to_string()),
            position: self.position,
        }
    }

    /* ------------------------ Niveaux de la grammaire ------------------------ */

    pub fn primaire(&mut self) -> Resultat<Expr> {
        match self.peek() {
            Some(t @ Tok::Num(texte)) => {
                self.advance(t);
                let v = texte
                    .parse::<f64>()
                    .map_err(|_| ErreurCalc::LitteralInvalide(texte.clone()))?;
                Ok(Expr::FloatLiteral(v))
            }

            Some(Tok::Plus | Tok::Minus) => self.unaire(),

            // variable : reconnue, jamais liée à une valeur
            Some(t @ Tok::Ident(id)) => {
                self.advance(t);
                Ok(Expr::Variable(id.clone()))
            }

            Some(t @ Tok::LPar) => {
                if self.profondeur == PROFONDEUR_MAX {
                    return Err(ErreurCalc::ImbricationTropProfonde {
                        limite: PROFONDEUR_MAX,
                        position: self.position,
                    });
                }
                self.advance(t);

                self.profondeur += 1;
                let interieur = self.additif();
                self.profondeur -= 1;
                let interieur = interieur?;

                if self.peek() != Some(&Tok::RPar) {
                    return Err(ErreurCalc::ParentheseNonFermee {
                        position: self.position,
                    });
                }
                self.advance(&Tok::RPar);
                Ok(interieur)
            }

            _ => Err(self.inattendu()),
        }
    }

    /// Chaîne de signes : "--x" => +x, "-+-x" => +x.
    pub fn unaire(&mut self) -> Resultat<Expr> {
        let mut nb_moins = 0usize;

        while let Some(t @ (Tok::Plus | Tok::Minus)) = self.peek() {
            if *t == Tok::Minus {
                nb_moins += 1;
            }
            self.advance(t);
        }

        let operande = self.primaire()?;
        Ok(Expr::unary(Signe::depuis_nb_moins(nb_moins), operande))
    }

    pub fn multiplicatif(&mut self) -> Resultat<Expr> {
        let mut expr = self.primaire()?;

        while let Some(t @ (Tok::Star | Tok::Slash)) = self.peek() {
            let op = if *t == Tok::Star {
                OpBinaire::Mul
            } else {
                OpBinaire::Div
            };
            self.advance(t);
            let droite = self.primaire()?;
            expr = Expr::binary(op, expr, droite);
        }

        Ok(expr)
    }

    pub fn additif(&mut self) -> Resultat<Expr> {
        let mut expr = self.multiplicatif()?;

        while let Some(t @ (Tok::Plus | Tok::Minus)) = self.peek() {
            let op = if *t == Tok::Plus {
                OpBinaire::Add
            } else {
                OpBinaire::Sub
            };
            self.advance(t);
            let droite = self.multiplicatif()?;
            expr = Expr::binary(op, expr, droite);
        }

        Ok(expr)
    }

    /// Le curseur doit être exactement en fin de séquence.
    fn verifier_fin(&self) -> Resultat<()> {
        match self.peek() {
            None => Ok(()),
            Some(t) => Err(ErreurCalc::JetonsRestants {
                jeton: t.to_string(),
                position: self.position,
            }),
        }
    }
}

/// Analyse une séquence déjà normalisée.
pub fn parse_jetons(jetons: &[Tok]) -> Resultat<Expr> {
    let mut analyseur = Analyseur::new(jetons);
    let expr = analyseur.additif()?;
    analyseur.verifier_fin()?;
    Ok(expr)
}

/// tokenize + analyse : l’arbre seul, rien n’est calculé (voir eval::parse).
pub fn construire(code: &str) -> Resultat<Expr> {
    let jetons = tokenize(code)?;
    let resultat = parse_jetons(&jetons);
    if let Err(e) = &resultat {
        log::debug!("analyse {code:?} : {e}");
    }
    resultat
}
