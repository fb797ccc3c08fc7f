//! # NextCar Command Line Entry Point
//!
//! Drives the screen controllers from a terminal.
//!
//! ```text
//! nextcar status
//! nextcar login --email ana@nextcar.com --senha secret
//! nextcar register --email bia@nextcar.com --senha pw --role admin
//! nextcar estoque --busca fiat
//! nextcar anuncie --marca Fiat --modelo Uno --preco 2500000 --foto car.jpg
//! nextcar logout
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use nextcar_api::ClientConfig;
use nextcar_app_lib::controllers::TabPress;
use nextcar_app_lib::error::AppResult;
use nextcar_app_lib::notice::Notice;
use nextcar_app_lib::picker::FilePicker;
use nextcar_app_lib::state::Tab;
use nextcar_app_lib::{init_tracing, App};
use nextcar_core::{AuthState, DraftField, Role, Thumbnail};

#[derive(Debug, Parser)]
#[command(name = "nextcar", version, about = "NextCar used-vehicle listings")]
struct Cli {
    /// Config file (defaults to nextcar.toml in the platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Backend base URL, overriding the config file
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show whether a session is stored
    Status,
    /// Sign in
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        senha: String,
    },
    /// Create an account
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        senha: String,
        /// USER or ADMIN
        #[arg(long, default_value = "USER")]
        role: Role,
    },
    /// Sign out
    Logout,
    /// List vehicles for sale
    Estoque {
        /// Filter by brand or model
        #[arg(long)]
        busca: Option<String>,
    },
    /// Publish a vehicle
    Anuncie(ListingArgs),
}

#[derive(Debug, Args)]
struct ListingArgs {
    #[arg(long)]
    marca: String,
    #[arg(long)]
    modelo: String,
    #[arg(long, default_value = "")]
    versao: String,
    #[arg(long, default_value = "")]
    ano: String,
    #[arg(long, default_value = "")]
    km: String,
    /// Price digits in centavos, as typed into the form
    #[arg(long)]
    preco: String,
    #[arg(long, default_value = "")]
    nome: String,
    #[arg(long, default_value = "")]
    telefone: String,
    /// JPEG file to attach (repeatable, up to 5)
    #[arg(long = "foto")]
    fotos: Vec<PathBuf>,
}

impl ListingArgs {
    fn value(&self, field: DraftField) -> &str {
        match field {
            DraftField::Marca => &self.marca,
            DraftField::Modelo => &self.modelo,
            DraftField::Versao => &self.versao,
            DraftField::Ano => &self.ano,
            DraftField::Km => &self.km,
            DraftField::Preco => &self.preco,
            DraftField::NomeVendedor => &self.nome,
            DraftField::TelefoneProprietario => &self.telefone,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let mut config = ClientConfig::load_or_default(cli.config);
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }

    let app = match App::open(config).await {
        Ok(app) => app,
        Err(e) => {
            print_notice(&e.notice);
            return ExitCode::FAILURE;
        }
    };

    let result = run(&app, cli.command).await;
    app.close().await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_notice(&e.notice);
            ExitCode::FAILURE
        }
    }
}

async fn run(app: &App, command: Command) -> AppResult<()> {
    match command {
        Command::Status => {
            let shell = app.tab_shell();
            match shell.on_focus().await {
                AuthState::Authenticated { role, login } => {
                    println!(
                        "Conectado como {} ({})",
                        login.as_deref().unwrap_or("?"),
                        role.map(|r| r.label()).unwrap_or("?")
                    );
                }
                _ => println!("Não conectado"),
            }
            if let Some(label) = shell.header_action().label() {
                println!("Ação: {}", label);
            }
        }
        Command::Login { email, senha } => {
            let login = app.login_controller();
            login.set_email(&email);
            login.set_password(&senha);
            login.submit().await?;
            println!("Bem-vindo, {}", email);
        }
        Command::Register { email, senha, role } => {
            let register = app.register_controller();
            register.set_email(&email);
            register.set_password(&senha);
            register.set_role(role);
            print_notice(&register.submit().await?);
        }
        Command::Logout => {
            if app.tab_shell().sign_out().await? {
                println!("Sessão encerrada");
            } else {
                println!("Não conectado");
            }
        }
        Command::Estoque { busca } => {
            let inventory = app.inventory_controller();
            inventory.load().await?;
            if let Some(term) = busca {
                inventory.set_search(&term);
            }
            for card in inventory.cards() {
                let photo = match card.thumbnail {
                    Thumbnail::Photo(_) => "foto",
                    Thumbnail::Placeholder(ref caption) => caption.as_str(),
                };
                println!(
                    "{} {} | {} | {} | {} [{}]",
                    card.title, card.versao, card.ano, card.km_label, card.price_label, photo
                );
            }
            if let Some(text) = inventory.empty_text() {
                println!("{}", text);
            }
        }
        Command::Anuncie(args) => {
            let shell = app.tab_shell();
            match shell.press_tab(Tab::Anuncie).await {
                TabPress::Opened(_) => {}
                TabPress::Redirected(notice) => {
                    print_notice(&notice);
                    return Ok(());
                }
                TabPress::Cancelled => return Ok(()),
            }

            let listing = app.listing_controller(Arc::new(FilePicker::new(args.fotos.clone())));
            listing.mount().await;
            for field in DraftField::ALL {
                let shown = listing.set_field(field, args.value(field));
                if !shown.is_empty() {
                    println!("{}: {}", field.placeholder(), shown);
                }
            }
            for _ in &args.fotos {
                listing.add_photo().await?;
            }
            println!("{}", listing.photo_counter());
            print_notice(&listing.submit().await?);
        }
    }
    Ok(())
}

fn print_notice(notice: &Notice) {
    println!("{}\n{}", notice.title, notice.message);
}
