//! Login command - authenticate and print the session token

use anyhow::{Context, Result};

use super::{
    emit_json, get_context, prompt_credentials, request, start_command, TOKEN_ENV, USER_ID_ENV,
};
use crate::output;

pub fn run(username: Option<String>, password: Option<String>, json: bool) -> Result<()> {
    let logger = start_command("login");
    let ctx = get_context()?;
    let (username, password) = prompt_credentials(username, password)?;

    let result = request(&logger, "login/", "Signing in...", || {
        ctx.session.login(&username, &password)
    });

    if json {
        return emit_json(result);
    }

    let user = result.context("Sign in failed")?;

    output::success("Signed in");
    println!("  User ID: {}", user.user_id);
    println!("  Token:   {}", user.token);
    println!();
    output::info("To skip the password prompt in this shell:");
    println!("  export {}={}", USER_ID_ENV, user.user_id);
    println!("  export {}={}", TOKEN_ENV, user.token);

    Ok(())
}
