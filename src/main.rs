// src/main.rs
//
// Calculatrice flottante — point d’entrée terminal
// ------------------------------------------------
// But:
// - EXPR... en arguments : évalue chacune, affiche, quitte
// - Sans argument        : lit l’entrée standard ligne par ligne
// - Journal              : RUST_LOG (défaut "warn")

use std::error::Error;
use std::io;

use clap::{App, AppSettings, Arg};

mod app;

use app::etat::LARGEUR_DEFAUT;
use app::AppCalc;

/// Titre unique (aide + version).
const TITRE_APP: &str = "Calculatrice flottante";

struct Reglages {
    largeur: usize,
    demarche: bool,
    expressions: Vec<String>,
}

fn lire_reglages() -> Result<Reglages, Box<dyn Error>> {
    let matches = App::new(TITRE_APP)
        .version(env!("CARGO_PKG_VERSION"))
        .about("Évalue des expressions arithmétiques (+ - * /, parenthèses, multiplication implicite)")
        // "-5+2" doit rester une expression, pas une option
        .setting(AppSettings::AllowLeadingHyphen)
        .arg(
            Arg::with_name("largeur")
                .long("largeur")
                .short("l")
                .takes_value(true)
                .value_name("N")
                .help("Largeur d’affichage de la réponse (caractères)"),
        )
        .arg(
            Arg::with_name("demarche")
                .long("demarche")
                .short("d")
                .help("Affiche les jetons et l’arbre de chaque évaluation"),
        )
        .arg(
            Arg::with_name("EXPR")
                .multiple(true)
                .help("Expressions à évaluer (sinon : lecture de l’entrée standard)"),
        )
        .get_matches();

    let largeur = match matches.value_of("largeur") {
        Some(n) => n.parse::<usize>()?,
        None => LARGEUR_DEFAUT,
    };

    let expressions = matches
        .values_of("EXPR")
        .map(|vals| vals.map(str::to_string).collect())
        .unwrap_or_default();

    Ok(Reglages {
        largeur,
        demarche: matches.is_present("demarche"),
        expressions,
    })
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let reglages = lire_reglages()?;

    let mut app = AppCalc::default();
    app.set_largeur(reglages.largeur);
    app.trace = reglages.demarche;
    log::debug!("largeur {} ; démarche {}", app.largeur, app.trace);

    let stdout = io::stdout();
    let mut sortie = stdout.lock();

    if reglages.expressions.is_empty() {
        app.executer(io::stdin().lock(), &mut sortie)?;
    } else {
        for expr in reglages.expressions {
            app.entree = expr;
            app.eval_via_noyau();
            app.afficher(&mut sortie)?;
        }
    }

    Ok(())
}
