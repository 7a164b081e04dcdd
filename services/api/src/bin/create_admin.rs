//! Creates the first admin account so later users can be created through the
//! admin-gated `POST /oauth2/users` route.

use anyhow::Context as _;
use clap::Parser;
use sea_orm::Database;

use cms_api::config::BootstrapConfig;
use cms_api::infra::db::DbUserRepository;
use cms_api::usecase::auth::BootstrapAdminUseCase;
use cms_core::config::Config;
use cms_core::tracing::init_tracing;

#[derive(Parser)]
#[command(name = "create-admin", about = "Create an admin user")]
struct Args {
    /// Login name for the new admin.
    #[arg(long)]
    username: String,
    #[arg(long)]
    password: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();
    let config = BootstrapConfig::try_from_env().context("load configuration")?;

    let db = Database::connect(&config.database_url)
        .await
        .context("connect to database")?;

    let usecase = BootstrapAdminUseCase {
        repo: DbUserRepository { db },
        password_cost: config.bcrypt_cost,
    };
    let user = usecase
        .execute(args.username, args.password)
        .await
        .context("create admin user")?;

    println!("created admin {} ({})", user.username, user.id);
    Ok(())
}
