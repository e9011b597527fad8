// src/app/console.rs
//
// Vue terminale (ligne par ligne)
// -------------------------------
// - Chaque ligne est une nouvelle entrée, évaluée aussitôt
// - Commandes : ":ac" (remise à zéro), "=" (la réponse devient l’entrée), ":q" (quitter)
// - Une faute de saisie n’arrête jamais la boucle : elle s’affiche, la réponse reste

use std::io::{self, BufRead, Write};

use calculatrice_expr::noyau::eval_expression;
use calculatrice_expr::noyau::saisie::normaliser_saisie;

use super::etat::{AppCalc, Demarche};

#[derive(Debug, PartialEq)]
enum Commande<'a> {
    Quitter,
    ResetTotal,
    ReprendreAns,
    Saisie(&'a str),
}

impl<'a> Commande<'a> {
    fn depuis(ligne: &'a str) -> Self {
        match ligne.trim() {
            ":q" | ":quitter" => Commande::Quitter,
            ":ac" | "AC" => Commande::ResetTotal,
            "=" => Commande::ReprendreAns,
            s => Commande::Saisie(s),
        }
    }
}

impl AppCalc {
    /// Boucle principale : lit jusqu’à EOF ou ":q".
    pub fn executer<R: BufRead, W: Write>(&mut self, lecteur: R, mut sortie: W) -> io::Result<()> {
        for ligne in lecteur.lines() {
            let ligne = ligne?;

            match Commande::depuis(&ligne) {
                Commande::Quitter => break,
                Commande::ResetTotal => self.reset_total(),
                Commande::ReprendreAns => {
                    self.reprendre_ans();
                    if self.erreur.is_empty() {
                        self.eval_via_noyau();
                    }
                }
                Commande::Saisie(s) => {
                    self.entree = s.to_string();
                    self.eval_via_noyau();
                }
            }

            self.afficher(&mut sortie)?;
        }
        sortie.flush()
    }

    /// Évalue l’entrée via le noyau, puis dépose réponse/erreur/démarche dans l’état.
    pub fn eval_via_noyau(&mut self) {
        if self.entree.trim().is_empty() {
            self.clear_resultats();
            return;
        }

        let texte = normaliser_saisie(&self.entree);
        match eval_expression(&texte) {
            Ok(ev) => {
                let d = Demarche {
                    jetons: ev.demarche.jetons,
                    arbre: ev.demarche.arbre,
                };
                self.set_resultat(ev.valeur, d);
            }
            Err(e) => {
                log::debug!("saisie {:?} non évaluée : {e}", self.entree);
                if e.est_syntaxe() {
                    self.set_erreur(format!("syntaxe : {e}"));
                } else {
                    self.set_erreur(e.to_string());
                }
            }
        }
    }

    pub fn afficher<W: Write>(&self, sortie: &mut W) -> io::Result<()> {
        if self.entree.trim().is_empty() && self.erreur.is_empty() {
            return Ok(());
        }

        writeln!(sortie, "{} = {}", self.affichage_entree(), self.affichage_ans())?;

        if !self.erreur.is_empty() {
            writeln!(sortie, "! {}", self.erreur)?;
        }
        if self.trace && !self.demarche.jetons.is_empty() {
            writeln!(sortie, "  jetons : {}", self.demarche.jetons)?;
            writeln!(sortie, "  arbre  : {}", self.demarche.arbre)?;
        }
        Ok(())
    }
}
