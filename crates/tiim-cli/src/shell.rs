//! Interactive session: a line-oriented front end over [`Session`].

use std::io::Write as _;

use anyhow::Context;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tiim_core::{messages, CheckoutForm, DeliveryMethod};

use crate::geo::Geolocation;
use crate::map;
use crate::render;
use crate::session::Session;

const HELP: &str = "\
Commandes:
  search <texte>        rechercher par nom ou DCI
  barcode <code>        rechercher par code-barres (EAN)
  results               afficher les derniers résultats
  add <n>               ajouter le résultat n au panier
  qty <n> <quantité>    changer la quantité de la ligne n
  inc <n> / dec <n>     + / - sur la ligne n
  rm <n>                retirer la ligne n
  cart                  afficher le panier
  map [ville]           pharmacies sur la carte
  checkout              finaliser la commande
  cancel                fermer la commande en cours
  help                  cette aide
  quit                  quitter";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ShellCommand {
    Search { query: String },
    Barcode { code: String },
    Results,
    Add { result: usize },
    Quantity { line: usize, quantity: u32 },
    Increment { line: usize },
    Decrement { line: usize },
    Remove { line: usize },
    Cart,
    Map { city: Option<String> },
    Checkout,
    Cancel,
    Help,
    Quit,
}

impl ShellCommand {
    /// Parses one input line. Indices are typed 1-based and stored 0-based.
    /// Quantities below 1 are clamped to 1.
    pub(crate) fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(w, r)| (w, r.trim()));

        let command = match word.to_lowercase().as_str() {
            "search" | "s" => ShellCommand::Search {
                query: rest.to_string(),
            },
            "barcode" | "ean" => {
                if rest.is_empty() {
                    return Err("usage: barcode <code>".to_string());
                }
                ShellCommand::Barcode {
                    code: rest.to_string(),
                }
            }
            "results" => ShellCommand::Results,
            "add" => ShellCommand::Add {
                result: parse_index(rest)?,
            },
            "qty" => {
                let (line, quantity) = rest
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| "usage: qty <n> <quantité>".to_string())?;
                let quantity: i64 = quantity
                    .trim()
                    .parse()
                    .map_err(|_| format!("invalid quantity '{}'", quantity.trim()))?;
                ShellCommand::Quantity {
                    line: parse_index(line)?,
                    quantity: u32::try_from(quantity.max(1)).unwrap_or(u32::MAX),
                }
            }
            "inc" | "+" => ShellCommand::Increment {
                line: parse_index(rest)?,
            },
            "dec" | "-" => ShellCommand::Decrement {
                line: parse_index(rest)?,
            },
            "rm" | "remove" => ShellCommand::Remove {
                line: parse_index(rest)?,
            },
            "cart" => ShellCommand::Cart,
            "map" => ShellCommand::Map {
                city: Some(rest).filter(|c| !c.is_empty()).map(str::to_string),
            },
            "checkout" => ShellCommand::Checkout,
            "cancel" => ShellCommand::Cancel,
            "help" | "?" => ShellCommand::Help,
            "quit" | "exit" | "q" => ShellCommand::Quit,
            other => return Err(format!("unknown command '{other}' (try 'help')")),
        };
        Ok(Some(command))
    }
}

fn parse_index(raw: &str) -> Result<usize, String> {
    match raw.trim().parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(format!("expected a line number starting at 1, got '{raw}'")),
    }
}

/// Runs the interactive loop until `quit` or end of input.
pub(crate) async fn run<R>(
    mut session: Session,
    geo: Geolocation,
    default_city: &str,
    input: R,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    session.mount(&geo).await;

    println!("FASO TiiM Roogo \u{2014} recherche de médicaments, commande et livraison rapide");
    if let Some(here) = session.coordinates() {
        println!("{}: {here}", messages::YOU_ARE_HERE);
    }
    let view = map::mount(session.client(), &geo, Some(default_city)).await;
    println!("{}", render::map(&view));
    println!("{HELP}");

    while let Some(line) = prompt(&mut lines, "> ").await? {
        let command = match ShellCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        match command {
            ShellCommand::Quit => break,
            ShellCommand::Help => println!("{HELP}"),
            ShellCommand::Search { query } => {
                session.search(Some(&query), None).await;
                show_search(&session);
            }
            ShellCommand::Barcode { code } => {
                session.search(None, Some(&code)).await;
                show_search(&session);
            }
            ShellCommand::Results => println!("{}", render::search_panel(session.search_panel())),
            ShellCommand::Add { result } => match session.add_to_cart(result) {
                Ok(item) => println!("Ajouté: {}", item.medicine_name),
                Err(e) => println!("{e}"),
            },
            ShellCommand::Quantity { line, quantity } => {
                report(session.update_quantity(line, quantity), &session);
            }
            ShellCommand::Increment { line } => report(session.increment(line), &session),
            ShellCommand::Decrement { line } => report(session.decrement(line), &session),
            ShellCommand::Remove { line } => report(session.remove(line), &session),
            ShellCommand::Cart => println!("{}", render::cart(session.cart())),
            ShellCommand::Map { city } => {
                let city = city.as_deref().unwrap_or(default_city);
                let view = map::mount(session.client(), &geo, Some(city)).await;
                println!("{}", render::map(&view));
            }
            ShellCommand::Checkout => checkout(&mut session, &mut lines).await?,
            ShellCommand::Cancel => match session.close_checkout() {
                Ok(()) => println!("Commande annulée."),
                Err(e) => println!("{e}"),
            },
        }
    }

    Ok(())
}

fn show_search(session: &Session) {
    println!(
        "{}",
        render::search_outcome(session.message(), session.search_panel())
    );
}

fn report<T>(outcome: anyhow::Result<T>, session: &Session) {
    match outcome {
        Ok(_) => println!("{}", render::cart(session.cart())),
        Err(e) => println!("{e}"),
    }
}

/// Collects the checkout fields and submits them. Input ending halfway
/// through the form cancels the checkout.
async fn checkout<R>(session: &mut Session, lines: &mut Lines<R>) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    if let Err(e) = session.open_checkout() {
        println!("{}", render::cart(session.cart()));
        tracing::debug!(error = %e, "checkout not opened");
        return Ok(());
    }

    println!("Finaliser la commande");
    println!("{}", render::cart(session.cart()));
    println!("{}", messages::PRESCRIPTION_NOTICE);

    let Some(form) = read_form(lines).await? else {
        tracing::debug!("input closed during checkout");
        session.close_checkout()?;
        println!("Commande annulée.");
        return Ok(());
    };

    session.submit_checkout(&form).await;
    if let Some(message) = session.message() {
        println!("{message}");
    }
    if session.checkout().is_open() {
        println!("Tapez 'checkout' pour réessayer ou 'cancel' pour fermer.");
    }
    Ok(())
}

/// Prompts for every checkout field. `None` when input ends first.
async fn read_form<R>(lines: &mut Lines<R>) -> anyhow::Result<Option<CheckoutForm>>
where
    R: AsyncBufRead + Unpin,
{
    let Some(user_name) = ask(lines, "Nom complet: ").await? else {
        return Ok(None);
    };
    let Some(user_phone) = ask(lines, "Téléphone: ").await? else {
        return Ok(None);
    };

    let delivery_method = loop {
        let Some(raw) = ask(lines, "Livraison ou Click & Collect [delivery/click_collect]: ").await?
        else {
            return Ok(None);
        };
        if raw.is_empty() {
            break DeliveryMethod::Delivery;
        }
        match raw.parse::<DeliveryMethod>() {
            Ok(method) => break method,
            Err(e) => println!("{e}"),
        }
    };

    let delivery_address = if delivery_method == DeliveryMethod::Delivery {
        let Some(address) = ask(lines, "Adresse de livraison: ").await? else {
            return Ok(None);
        };
        address
    } else {
        String::new()
    };

    let Some(prescription_url) = ask(lines, "Lien vers l'ordonnance (si requis): ").await? else {
        return Ok(None);
    };

    Ok(Some(CheckoutForm {
        user_name,
        user_phone,
        delivery_method,
        delivery_address,
        prescription_url,
    }))
}

async fn prompt<R>(lines: &mut Lines<R>, label: &str) -> anyhow::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    print!("{label}");
    std::io::stdout().flush().context("failed to flush stdout")?;
    lines.next_line().await.context("failed to read input")
}

async fn ask<R>(lines: &mut Lines<R>, label: &str) -> anyhow::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    Ok(prompt(lines, label).await?.map(|s| s.trim().to_string()))
}
