// src/noyau/erreur.rs
//
// Taxonomie des erreurs du noyau.
// Toutes sont terminales pour l’appel courant : le noyau ne réessaie jamais.
// (La variable non résolue n’est PAS une erreur : voir eval::Valeur.)

use thiserror::Error;

pub type Resultat<T> = Result<T, ErreurCalc>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ErreurCalc {
    /// Plus de ')' que de '(' sur l’ensemble de l’entrée.
    #[error("parenthèses ouvrantes manquantes ({ouvrantes} ouvrante(s), {fermantes} fermante(s))")]
    ParenthesesOuvrantesManquantes { ouvrantes: usize, fermantes: usize },

    /// Le jeton courant ne peut pas commencer une expression primaire.
    #[error("attendu : un nombre, une variable ou une parenthèse (trouvé {} en position {position})", decrit(.jeton))]
    JetonInattendu {
        jeton: Option<String>,
        position: usize,
    },

    #[error("')' attendue en position {position}")]
    ParentheseNonFermee { position: usize },

    /// Expression complète mais jetons non consommés.
    #[error("'{jeton}' inattendu après {position}")]
    JetonsRestants { jeton: String, position: usize },

    /// Garde-fou de la descente récursive.
    #[error("imbrication trop profonde : plus de {limite} parenthèses (position {position})")]
    ImbricationTropProfonde { limite: usize, position: usize },

    #[error("littéral invalide : {0}")]
    LitteralInvalide(String),

    #[error("division par zéro")]
    DivisionParZero,
}

impl ErreurCalc {
    /// Famille « erreur de syntaxe » (entrée mal formée, pas d’arithmétique).
    pub fn est_syntaxe(&self) -> bool {
        matches!(
            self,
            ErreurCalc::JetonInattendu { .. }
                | ErreurCalc::ParentheseNonFermee { .. }
                | ErreurCalc::JetonsRestants { .. }
        )
    }
}

fn decrit(jeton: &Option<String>) -> String {
    match jeton {
        Some(t) => format!("'{t}'"),
        None => "la fin de l’entrée".to_string(),
    }
}
