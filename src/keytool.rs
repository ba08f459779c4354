//! Operator tool for issuing voter access keys and hashing the
//! administrator password. Both outputs match what the server expects
//! from its configuration and login requests.

use clap::{Arg, ArgAction, ArgMatches, Command};

use voting_backend::model::{
    access_key::issue_access_key,
    address::{Address, AddressError},
    admin::hash_password,
};

const PROGRAM_NAME: &str = "voting-keytool";

const ABOUT_TEXT: &str = "Issue voter access keys and hash the administrator password.

EXIT CODES:
     0: Success.
     1: Error.";

const ACCESS_KEY: &str = "access-key";
const HASH_PASSWORD: &str = "hash-password";

const SECRET: &str = "SECRET";
const ADDRESS: &str = "ADDRESS";
const PASSWORD: &str = "PASSWORD";

const SECRET_HELP: &str = "The server's `hmac_secret` setting";

const ADDRESS_HELP: &str = "The voter address, `0x` followed by 40 hex digits";

const PASSWORD_HELP: &str = "The administrator password; the output goes in\n\
the server's `admin_password_hash` setting";

/// Construct the CLI configuration.
fn cli() -> Command {
    // Make the build dirty when the toml changes.
    include_str!("../Cargo.toml");

    clap::command!(PROGRAM_NAME)
        .about(ABOUT_TEXT)
        .subcommand_required(true)
        .subcommand(
            Command::new(ACCESS_KEY)
                .about("Print the access key for a voter address")
                .arg(
                    Arg::new(SECRET)
                        .long("secret")
                        .help(SECRET_HELP)
                        .action(ArgAction::Set)
                        .required(true),
                )
                .arg(
                    Arg::new(ADDRESS)
                        .help(ADDRESS_HELP)
                        .action(ArgAction::Set)
                        .required(true),
                ),
        )
        .subcommand(
            Command::new(HASH_PASSWORD)
                .about("Print an argon2 hash of the administrator password")
                .arg(
                    Arg::new(PASSWORD)
                        .help(PASSWORD_HELP)
                        .action(ArgAction::Set)
                        .required(true),
                ),
        )
}

/// Errors that this program may produce.
#[derive(Debug, Eq, PartialEq)]
enum Error {
    /// The address argument could not be parsed.
    Address(AddressError),
    /// Hashing failed with the contained message.
    Hash(String),
}

fn access_key(secret: &str, address: &str) -> Result<String, Error> {
    let address: Address = address.parse().map_err(Error::Address)?;
    Ok(issue_access_key(secret.as_bytes(), &address))
}

/// Run the chosen subcommand, report the result, and return the exit code.
fn run(args: &ArgMatches) -> u8 {
    let result = match args.subcommand() {
        Some((ACCESS_KEY, sub_args)) => {
            // Required arguments are guaranteed to be present.
            let secret: &String = sub_args.get_one(SECRET).unwrap();
            let address: &String = sub_args.get_one(ADDRESS).unwrap();
            access_key(secret, address)
        }
        Some((HASH_PASSWORD, sub_args)) => {
            let password: &String = sub_args.get_one(PASSWORD).unwrap();
            hash_password(password).map_err(|e| Error::Hash(e.to_string()))
        }
        // A subcommand is required.
        _ => unreachable!(),
    };

    match result {
        Ok(output) => {
            println!("{output}");
            0
        }
        Err(Error::Address(err)) => {
            println!("Invalid address: {err}");
            1
        }
        Err(Error::Hash(msg)) => {
            println!("Hashing failed: {msg}");
            1
        }
    }
}

fn main() {
    let args = cli().get_matches();
    let exit_code = run(&args);
    std::process::exit(exit_code.into())
}
