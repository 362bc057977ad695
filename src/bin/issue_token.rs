// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the customer-auth project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Issue identity tokens from the command line
//!
//! Loads the signing configuration either from a YAML file or from the
//! `JWT_SECRET` environment variable and prints a signed token for the
//! requested subject.

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use customer_auth::auth::AuthService;
use customer_auth::config::{AuthConfig, Config};
use std::path::PathBuf;
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let matches = build_cli().get_matches();

    let auth_config = load_auth_config(&matches)?;
    let auth = AuthService::new(&auth_config).context("Failed to initialize auth service")?;

    let subject = matches
        .get_one::<String>("user")
        .expect("user argument is required");
    let token = auth.issue(subject)?;

    if matches.get_flag("quiet") {
        print!("{}", token);
    } else {
        println!("Token issued for subject '{}'", subject);
        println!("Issuer:   {}", auth_config.issuer);
        println!("Audience: {}", auth_config.audience);
        println!("Valid:    {} seconds", auth_config.token_validity_secs);
        println!("Token:    {}", token);
    }

    Ok(())
}

fn build_cli() -> Command {
    Command::new("issue_token")
        .version("1.0")
        .about("Issue signed identity tokens manually")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Path to configuration file")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("user")
                .short('u')
                .long("user")
                .value_name("SUBJECT")
                .help("Subject identifier to issue the token for")
                .required(true),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Suppress output messages, only the token is printed")
                .action(ArgAction::SetTrue),
        )
}

/// Take the signing configuration from the config file when one was given,
/// otherwise from the JWT_SECRET environment variable.
fn load_auth_config(matches: &ArgMatches) -> Result<AuthConfig> {
    match matches.get_one::<PathBuf>("config") {
        Some(path) => Ok(Config::from_file(path)?.auth),
        None => AuthConfig::from_env()
            .context("No config file given and no usable JWT_SECRET in the environment"),
    }
}
