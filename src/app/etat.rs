//! src/app/etat.rs
//!
//! État de la calculatrice (sans console, sans évaluation).
//!
//! Rôle : contenir l’entrée, la dernière réponse, l’erreur et la démarche,
//! et offrir des opérations simples (AC, =) sans logique d’affichage terminal.
//!
//! Contrats :
//! - Aucune évaluation ici (pas de tokenisation, pas d’analyse).
//! - Une saisie fautive ne remplace jamais la dernière réponse.
//! - Défense en profondeur : bornes sur la largeur d’affichage.

use calculatrice_expr::noyau::eval::Valeur;
use calculatrice_expr::noyau::format::format_valeur;
use calculatrice_expr::noyau::is_float;
use calculatrice_expr::noyau::saisie::grouper_milliers;

/// Largeur d’affichage de la réponse par défaut (caractères).
pub const LARGEUR_DEFAUT: usize = 16;

/// Garde-fou : on borne la largeur.
const LARGEUR_MAX: usize = 64;

#[derive(Clone, Default, Debug)]
pub struct Demarche {
    pub jetons: String,
    pub arbre: String,
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- sorties ---
    pub ans: f64,                    // dernière réponse numérique
    pub non_resolue: Option<String>, // variable en cause si la dernière saisie n’a pas de valeur
    pub erreur: String,              // message d’erreur (si tokenisation/analyse/éval échoue)

    // --- démarche ---
    pub demarche: Demarche,

    // --- paramètres ---
    pub largeur: usize,
    pub trace: bool, // afficher la démarche après chaque saisie
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            entree: String::new(),
            ans: 0.0,
            non_resolue: None,
            erreur: String::new(),
            demarche: Demarche::default(),
            largeur: LARGEUR_DEFAUT,
            trace: false,
        }
    }
}

impl AppCalc {
    /* ------------------------ Actions (état seulement) ------------------------ */

    /// AC : remise à zéro totale (entrée + réponse + résultats).
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.ans = 0.0;
        self.clear_resultats();
    }

    /// Efface erreur + démarche + variable en cause (garde entrée et réponse).
    pub fn clear_resultats(&mut self) {
        self.non_resolue = None;
        self.erreur.clear();
        self.demarche = Demarche::default();
    }

    /// = : la réponse redevient l’entrée, si son texte est un littéral acceptable.
    /// Une réponse non résolue n’a pas de texte numérique : refusée aussi.
    pub fn reprendre_ans(&mut self) {
        if self.non_resolue.is_some() {
            self.set_erreur("format incorrect");
            return;
        }
        let texte = self.ans.to_string();
        if is_float(Some(texte.as_str())) {
            self.entree = texte;
            self.erreur.clear();
        } else {
            self.set_erreur("format incorrect");
        }
    }

    /// Choix UX : on CONSERVE `ans` pour ne pas “effacer l’écran” sur une faute.
    pub fn set_erreur(&mut self, msg: impl Into<String>) {
        self.erreur = msg.into();
        self.non_resolue = None;
        self.demarche = Demarche::default();
    }

    /// Dépose un résultat. Une valeur non résolue laisse `ans` intact.
    pub fn set_resultat(&mut self, valeur: Valeur, demarche: Demarche) {
        self.erreur.clear();
        self.demarche = demarche;

        match valeur {
            Valeur::Nombre(v) => {
                self.ans = v;
                self.non_resolue = None;
            }
            Valeur::NonResolue(id) => self.non_resolue = Some(id),
        }
    }

    pub fn set_largeur(&mut self, largeur: usize) {
        self.largeur = largeur.clamp(1, LARGEUR_MAX);
    }

    /* ------------------------ Lecture pour l’affichage ------------------------ */

    pub fn affichage_entree(&self) -> String {
        grouper_milliers(&self.entree)
    }

    /// Vide si l’entrée est vide (rien à montrer) ; "?x" si la saisie reste non résolue.
    pub fn affichage_ans(&self) -> String {
        if self.entree.trim().is_empty() {
            return String::new();
        }
        let valeur = match &self.non_resolue {
            Some(id) => Valeur::NonResolue(id.clone()),
            None => Valeur::Nombre(self.ans),
        };
        format_valeur(&valeur, self.largeur)
    }
}
