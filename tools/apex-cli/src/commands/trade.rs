//! Trade account commands.

use anyhow::{Context as _, Result};
use apex_trade::{RouteAccess, TradeAccount};
use dialoguer::{Input, Password};

use super::{TradeArgs, TradeCommand};
use crate::context::Context;

/// Run the trade command.
pub async fn run(args: TradeArgs, ctx: &Context) -> Result<()> {
    match args.command {
        TradeCommand::Login { email, password } => login(email, password, ctx).await,
        TradeCommand::Logout => logout(ctx),
        TradeCommand::Status => status(ctx),
    }
}

async fn login(email: Option<String>, password: Option<String>, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_storefront()?;

    let email = match email {
        Some(email) => email,
        None => Input::<String>::new().with_prompt("Email").interact_text()?,
    };
    let password = match password {
        Some(password) => password,
        None => Password::new().with_prompt("Password").interact()?,
    };

    let spinner = ctx.output.spinner("Signing in...");
    let result = store.login(&email, &password).await;
    spinner.finish_and_clear();
    let account = result.context("Trade login failed")?;

    if ctx.output.is_json() {
        ctx.output.json(&account);
        return Ok(());
    }

    ctx.output
        .success(&format!("Signed in as {}", account.company_name));
    print_account(&account, ctx);
    ctx.output.info("Prices are now shown excluding VAT");
    Ok(())
}

fn logout(ctx: &Context) -> Result<()> {
    let mut store = ctx.open_storefront()?;
    if store.trade_user().is_none() {
        ctx.output.info("Not signed in");
        return Ok(());
    }

    store.logout()?;
    ctx.output.success("Signed out");
    Ok(())
}

fn status(ctx: &Context) -> Result<()> {
    let store = ctx.open_storefront()?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "account": store.trade_user() }));
        return Ok(());
    }

    match (store.trade_access(), store.trade_user()) {
        (RouteAccess::Allow, Some(account)) => {
            ctx.output.header("Trade account");
            print_account(account, ctx);
        }
        (RouteAccess::Redirect(path), _) => {
            ctx.output
                .info(&format!("Not signed in (trade pages redirect to {})", path));
            ctx.output.info("Run `apex trade login` to sign in");
        }
        _ => ctx.output.info("Session not available"),
    }
    Ok(())
}

fn print_account(account: &TradeAccount, ctx: &Context) {
    ctx.output.kv("Company", &account.company_name);
    ctx.output.kv("Account", &account.account_number);
    ctx.output.kv("Email", &account.email);
    ctx.output.kv(
        "Tier",
        &format!(
            "{} ({} off list)",
            account.discount_tier,
            account.discount_tier.discount()
        ),
    );
    ctx.output.kv("Credit limit", &account.credit_limit.to_string());
}
