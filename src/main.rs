use std::process;

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use rand::rngs::OsRng;
use textbook_rsa::{generate_key_material, KeyGenConfig};

const DEFAULT_MESSAGE: &str = "RSA from first principles: primes, totients and modular inverses.";

/// Generate a textbook RSA key and round-trip a message through it
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Bit length of each prime (multiple of 8)
    #[arg(long, default_value_t = 1024)]
    bits: u32,

    /// Miller-Rabin rounds per candidate
    #[arg(long, default_value_t = 10)]
    rounds: u32,

    /// Give up after this many prime or exponent draws
    #[arg(long)]
    max_attempts: Option<u64>,

    /// Message to encrypt
    #[arg(long, default_value = DEFAULT_MESSAGE)]
    message: String,
}

fn run(args: Args) -> anyhow::Result<()> {
    let mut config = KeyGenConfig::default()
        .with_prime_bits(args.bits)
        .with_rounds(args.rounds);
    config.max_attempts = args.max_attempts;

    let keys = generate_key_material(&config, &mut OsRng).context("key generation failed")?;
    println!("p: {}\n", keys.p);
    println!("q: {}\n", keys.q);
    println!("n: {}\n", keys.n);
    println!("phi(n): {}\n", keys.phi);
    println!("e: {}\n", keys.e);
    println!("d: {}\n", keys.d);

    let keypair = keys.keypair();
    println!("Public key (n, e): ({}, {})\n", keypair.public_key.n, keypair.public_key.e);
    println!("Private key (n, d): ({}, {})\n", keypair.private_key.n, keypair.private_key.d);

    println!("Message: {}\n", args.message);
    let ciphertext = keypair
        .public_key
        .encrypt_string(&args.message)
        .context("encryption failed")?;
    println!("Encrypted blocks: {}\n", ciphertext);

    let recovered = keypair
        .private_key
        .decrypt_to_string(&ciphertext)
        .context("decryption failed")?;
    println!("Decrypted message: {}", recovered);
    Ok(())
}

fn main() {
    env_logger::builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(e) = run(Args::parse()) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}
