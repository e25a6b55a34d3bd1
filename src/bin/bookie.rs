//! Interactive betting table.
//!
//! Reads lines such as `alice bet 50 @bob`, `bob bet call` or
//! `#2 carol bet status` and prints every display and reply the
//! sessions produce. `balances` prints the ledger, `quit` exits.

use bookie::archive::*;
use bookie::book::*;
use bookie::cli::*;
use bookie::ledger::*;
use bookie::wager::Order;
use bookie::*;
use clap::Parser;
use colored::Colorize;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    log();
    kys();
    let args = Args::parse();
    let directory = Directory::new(&args.members, &args.bots);
    let vault = Arc::new(Vault::new(
        directory.members().map(|m| (m.id(), args.balance)),
    ));
    let (ledger, archive) = backends(&args, vault.clone()).await?;
    let bookie = Bookie::new(ledger, Arc::new(Terminal::default()), archive, args.config());
    log::info!(
        "seated {} with {} points each, payout {}",
        directory
            .members()
            .map(|m| m.name())
            .collect::<Vec<_>>()
            .join(", "),
        args.balance,
        bookie.config().payout
    );
    loop {
        let input = tokio::task::spawn_blocking(|| {
            dialoguer::Input::<String>::new()
                .with_prompt(">")
                .allow_empty(true)
                .interact_text()
        })
        .await??;
        match input.trim() {
            "" => continue,
            "quit" | "exit" => break,
            "help" => println!("{}", Order::USAGE),
            "balances" => {
                for member in directory.members() {
                    println!("  {:<16} {}", member.name(), vault.holding(member.id()).await);
                }
            }
            line => match Line::parse(line, &directory) {
                Err(e) => eprintln!("{}", e.to_string().red()),
                Ok(Line { order: None, .. }) => println!("{}", Order::USAGE),
                Ok(Line {
                    venue,
                    author,
                    order: Some(order),
                }) => match bookie.submit(venue, author, order).await {
                    Ok(receipt) => log::debug!("{:?}", receipt),
                    Err(rejection) => println!("{}", rejection.to_string().red()),
                },
            },
        }
    }
    Ok(())
}

type Adapters = (Arc<dyn Ledger>, Arc<dyn Archive>);

fn memory(vault: Arc<Vault>) -> Adapters {
    let ledger: Arc<dyn Ledger> = vault;
    let archive: Arc<dyn Archive> = Arc::new(Shelf::default());
    (ledger, archive)
}

#[cfg(not(feature = "database"))]
async fn backends(_: &Args, vault: Arc<Vault>) -> anyhow::Result<Adapters> {
    Ok(memory(vault))
}

#[cfg(feature = "database")]
async fn backends(args: &Args, vault: Arc<Vault>) -> anyhow::Result<Adapters> {
    match args.database {
        false => Ok(memory(vault)),
        true => {
            let client = database::db().await?;
            let ledger: Arc<dyn Ledger> = Arc::new(client.clone());
            let archive: Arc<dyn Archive> = Arc::new(client);
            Ok((ledger, archive))
        }
    }
}
