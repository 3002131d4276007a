use anyhow::{anyhow, bail, Context, Result};
use btc_hd_address::{decode_wif, derive_addresses, encode_wif, parse_address, Addresses};
use btc_hd_bip::bip32::{ExtendedPrivateKey, ExtendedPublicKey};
use btc_hd_bip::bip44::{account_path, Purpose, EXTERNAL_CHAIN};
use btc_hd_bip::{mnemonic_to_seed, DerivationPath, MnemonicEngine, MnemonicType};
use btc_hd_core::Network;
use btc_hd_wallet::{derive_key, derive_range, generate_mnemonic, DerivedKey};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use serde_json::json;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Upper bound on `derive --count`.
const MAX_COUNT: u32 = 10_000;

#[derive(Parser, Debug)]
#[command(
    name = "btc-hd",
    version,
    about = "Deterministic Bitcoin wallet: BIP39 mnemonics, BIP32 keys and addresses"
)]
struct Args {
    /// Use testnet version bytes, prefixes and coin type
    #[arg(long, global = true, default_value_t = false)]
    testnet: bool,

    /// Print results as JSON
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    /// Log derivation steps to stderr
    #[arg(short = 'v', long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create, encode and decode mnemonics
    #[command(subcommand)]
    Mnemonic(MnemonicCommand),

    /// Stretch a mnemonic into its 64-byte seed
    Seed {
        /// Mnemonic sentence (quote it)
        mnemonic: String,
        #[command(flatten)]
        passphrase: PassphraseArg,
    },

    /// Derive keys and addresses from a mnemonic
    Derive(DeriveArgs),

    /// Show the addresses of a private key, or parse an address
    Address {
        /// 64-char hex private key or WIF (an address with --parse)
        input: String,

        /// Treat the input as an address and report its network, kind and hash
        #[arg(long, default_value_t = false)]
        parse: bool,
    },

    /// Wallet import format
    #[command(subcommand)]
    Wif(WifCommand),

    /// Extended keys (xprv/xpub/tprv/tpub)
    #[command(subcommand)]
    Xkey(XkeyCommand),
}

#[derive(Subcommand, Debug)]
enum MnemonicCommand {
    /// Generate a random mnemonic
    Generate {
        /// Number of words
        #[arg(short = 'w', long, default_value = "12", value_parser = parse_word_count)]
        words: MnemonicType,
    },

    /// Encode hex entropy (16-32 bytes, multiple of 4) as a mnemonic
    FromEntropy {
        entropy: String,
    },

    /// Decode a mnemonic back to its entropy
    ToEntropy {
        mnemonic: String,
    },
}

#[derive(Subcommand, Debug)]
enum WifCommand {
    /// Encode a 64-char hex private key
    Encode {
        key: String,

        /// Omit the compressed-public-key flag
        #[arg(long, default_value_t = false)]
        uncompressed: bool,
    },

    /// Decode a WIF string
    Decode {
        wif: String,
    },
}

#[derive(Subcommand, Debug)]
enum XkeyCommand {
    /// Decode an extended key and show its fields
    Decode {
        key: String,

        /// Derive further from the decoded key before printing
        #[arg(long)]
        path: Option<DerivationPath>,
    },
}

#[derive(ClapArgs, Debug)]
struct PassphraseArg {
    /// Optional BIP39 passphrase
    #[arg(long, env = "BTC_HD_PASSPHRASE", default_value = "", hide_env_values = true)]
    passphrase: String,
}

#[derive(ClapArgs, Debug)]
struct DeriveArgs {
    /// Mnemonic sentence (quote it)
    mnemonic: String,

    #[command(flatten)]
    passphrase: PassphraseArg,

    /// Explicit derivation path, e.g. "m/84'/0'/0'/0/0"
    #[arg(long, conflicts_with_all = ["purpose", "account", "change", "index"])]
    path: Option<DerivationPath>,

    /// Standard path family used when --path is absent
    #[arg(long, value_enum, default_value_t = PurposeArg::Bip84)]
    purpose: PurposeArg,

    /// Account level (hardened)
    #[arg(long, default_value_t = 0)]
    account: u32,

    /// Change level (0 receiving, 1 change)
    #[arg(long, default_value_t = EXTERNAL_CHAIN)]
    change: u32,

    /// First address index
    #[arg(long, default_value_t = 0)]
    index: u32,

    /// Number of consecutive indices to derive
    #[arg(short = 'n', long, default_value_t = 1)]
    count: u32,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PurposeArg {
    Bip44,
    Bip49,
    Bip84,
}

impl From<PurposeArg> for Purpose {
    fn from(p: PurposeArg) -> Self {
        match p {
            PurposeArg::Bip44 => Purpose::Bip44,
            PurposeArg::Bip49 => Purpose::Bip49,
            PurposeArg::Bip84 => Purpose::Bip84,
        }
    }
}

fn parse_word_count(s: &str) -> std::result::Result<MnemonicType, String> {
    let count: usize = s.parse().map_err(|_| format!("invalid word count '{s}'"))?;
    MnemonicType::for_word_count(count).map_err(|_| {
        format!("word count must be one of 12, 15, 18, 21, 24 (got {count})")
    })
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn network_of(args: &Args) -> Network {
    if args.testnet {
        Network::Testnet
    } else {
        Network::Mainnet
    }
}

/// Parse a 32-byte private key from hex.
fn parse_key_hex(s: &str) -> Result<[u8; 32]> {
    let bytes = hex::decode(s.trim()).context("private key is not valid hex")?;
    bytes
        .try_into()
        .map_err(|b: Vec<u8>| anyhow!("private key must be 32 bytes, got {}", b.len()))
}

/// Accept either a 64-char hex key or a WIF string.
fn parse_private_key(s: &str, fallback: Network) -> Result<([u8; 32], Network)> {
    let s = s.trim();
    if s.len() == 64 && s.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Ok((parse_key_hex(s)?, fallback));
    }
    let wif = decode_wif(s).context("input is neither a hex private key nor a WIF")?;
    Ok((wif.key, wif.network))
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_addresses(addresses: &Addresses) {
    println!("Legacy:            {}", addresses.legacy);
    println!("Legacy compressed: {}", addresses.legacy_compressed);
    println!("P2SH-P2WPKH:       {}", addresses.script_hash);
    println!("P2WPKH:            {}", addresses.segwit);
}

fn print_derived(key: &DerivedKey) {
    println!();
    println!("=== {} ===", key.path);
    println!("xprv:    {}", key.xprv);
    println!("xpub:    {}", key.xpub);
    println!("Private: {}", hex::encode(key.private_key));
    println!("WIF:     {}", key.wif);
    print_addresses(&key.addresses);
}

fn run_mnemonic(cmd: &MnemonicCommand, json_out: bool) -> Result<()> {
    let engine = MnemonicEngine::english();
    match cmd {
        MnemonicCommand::Generate { words } => {
            let mnemonic = generate_mnemonic(&mut rand::thread_rng(), &engine, *words)
                .context("failed to generate mnemonic")?;
            if json_out {
                print_json(&json!({ "mnemonic": mnemonic, "words": words.word_count() }))?;
            } else {
                println!("{mnemonic}");
            }
        }
        MnemonicCommand::FromEntropy { entropy } => {
            let bytes = hex::decode(entropy.trim()).context("entropy is not valid hex")?;
            let mnemonic = engine.entropy_to_mnemonic(&bytes)?;
            if json_out {
                print_json(&json!({ "mnemonic": mnemonic }))?;
            } else {
                println!("{mnemonic}");
            }
        }
        MnemonicCommand::ToEntropy { mnemonic } => {
            let entropy = engine
                .mnemonic_to_entropy(mnemonic)
                .context("invalid mnemonic")?;
            if json_out {
                print_json(&json!({ "entropy": hex::encode(&entropy) }))?;
            } else {
                println!("{}", hex::encode(&entropy));
            }
        }
    }
    Ok(())
}

fn run_seed(mnemonic: &str, passphrase: &str, json_out: bool) -> Result<()> {
    MnemonicEngine::english()
        .validate(mnemonic)
        .context("invalid mnemonic")?;
    let seed = mnemonic_to_seed(mnemonic, passphrase);
    let seed_hex = hex::encode(seed.as_bytes());
    if json_out {
        print_json(&json!({ "seed": seed_hex }))?;
    } else {
        println!("{seed_hex}");
    }
    Ok(())
}

fn run_derive(d: &DeriveArgs, network: Network, json_out: bool) -> Result<()> {
    if d.count == 0 || d.count > MAX_COUNT {
        bail!("--count must be between 1 and {MAX_COUNT}");
    }
    let last = d
        .index
        .checked_add(d.count - 1)
        .ok_or_else(|| anyhow!("index range overflows"))?;

    let engine = MnemonicEngine::english();
    engine.validate(&d.mnemonic).context("invalid mnemonic")?;
    let seed = mnemonic_to_seed(&d.mnemonic, &d.passphrase.passphrase);

    let keys = match &d.path {
        Some(path) if d.count == 1 => vec![derive_key(seed.as_ref(), path, network)?],
        Some(path) => {
            // Range applies to the last level of an explicit path.
            let indices = path.indices();
            let (parent, first) = match indices.split_last() {
                Some((&first, parent)) => (DerivationPath::from(parent), first),
                None => bail!("--count needs a path with at least one level"),
            };
            let end = first
                .checked_add(d.count - 1)
                .ok_or_else(|| anyhow!("index range overflows"))?;
            let range: Vec<u32> = (first..=end).collect();
            derive_range(seed.as_ref(), &parent, &range, network)?
        }
        None => {
            let purpose = Purpose::from(d.purpose);
            let parent = account_path(purpose, network.coin_type(), d.account, d.change, 0)?;
            let parent = DerivationPath::from(&parent.indices()[..4]);
            let range: Vec<u32> = (d.index..=last).collect();
            debug!(%parent, count = range.len(), "deriving standard path range");
            derive_range(seed.as_ref(), &parent, &range, network)
                .with_context(|| format!("derivation under {parent} failed"))?
        }
    };

    if json_out {
        print_json(&serde_json::to_value(&keys)?)?;
    } else {
        for key in &keys {
            print_derived(key);
        }
    }
    Ok(())
}

fn run_address(input: &str, parse: bool, network: Network, json_out: bool) -> Result<()> {
    if parse {
        let parsed = parse_address(input).context("invalid address")?;
        if json_out {
            print_json(&serde_json::to_value(parsed)?)?;
        } else {
            println!("Network: {:?}", parsed.network);
            println!("Kind:    {}", parsed.kind);
            println!("Hash:    {}", hex::encode(parsed.hash));
        }
        return Ok(());
    }

    let (key, network) = parse_private_key(input, network)?;
    let addresses = derive_addresses(&key, network)?;
    if json_out {
        print_json(&json!({ "network": network, "addresses": addresses }))?;
    } else {
        print_addresses(&addresses);
    }
    Ok(())
}

fn run_wif(cmd: &WifCommand, network: Network, json_out: bool) -> Result<()> {
    match cmd {
        WifCommand::Encode { key, uncompressed } => {
            let key = parse_key_hex(key)?;
            // Rejects zero and out-of-range keys before encoding.
            derive_addresses(&key, network)?;
            let wif = encode_wif(&key, network, !uncompressed);
            if json_out {
                print_json(&json!({ "wif": wif, "network": network, "compressed": !uncompressed }))?;
            } else {
                println!("{wif}");
            }
        }
        WifCommand::Decode { wif } => {
            let decoded = decode_wif(wif).context("invalid WIF")?;
            let addresses = derive_addresses(&decoded.key, decoded.network)?;
            if json_out {
                print_json(&json!({
                    "private_key": hex::encode(decoded.key),
                    "network": decoded.network,
                    "compressed": decoded.compressed,
                    "addresses": addresses,
                }))?;
            } else {
                println!("Private:    {}", hex::encode(decoded.key));
                println!("Network:    {:?}", decoded.network);
                println!("Compressed: {}", decoded.compressed);
                print_addresses(&addresses);
            }
        }
    }
    Ok(())
}

fn describe_private(network: Network, key: &ExtendedPrivateKey) -> Result<serde_json::Value> {
    let public = key.to_extended_public();
    Ok(json!({
        "type": "private",
        "network": network,
        "depth": key.depth(),
        "parent_fingerprint": hex::encode(key.parent_fingerprint()),
        "child_number": key.child_number(),
        "fingerprint": hex::encode(key.fingerprint()),
        "chain_code": hex::encode(key.chain_code()),
        "private_key": hex::encode(key.private_key()),
        "public_key": hex::encode(key.public_key().compressed()),
        "xprv": key.to_base58(network),
        "xpub": public.to_base58(network),
        "wif": encode_wif(key.private_key(), network, true),
        "addresses": derive_addresses(key.private_key(), network)?,
    }))
}

fn describe_public(network: Network, key: &ExtendedPublicKey) -> serde_json::Value {
    json!({
        "type": "public",
        "network": network,
        "depth": key.depth(),
        "parent_fingerprint": hex::encode(key.parent_fingerprint()),
        "child_number": key.child_number(),
        "fingerprint": hex::encode(key.fingerprint()),
        "chain_code": hex::encode(key.chain_code()),
        "public_key": hex::encode(key.public_key().compressed()),
        "xpub": key.to_base58(network),
    })
}

fn run_xkey(cmd: &XkeyCommand, json_out: bool) -> Result<()> {
    let XkeyCommand::Decode { key, path } = cmd;
    let key = key.trim();
    let path = path.clone().unwrap_or_else(DerivationPath::master);

    let value = match ExtendedPrivateKey::from_base58(key) {
        Ok((network, xprv)) => {
            let node = xprv.derive_path(&path)?;
            describe_private(network, &node)?
        }
        Err(prv_err) => {
            let (network, xpub) = ExtendedPublicKey::from_base58(key).map_err(|pub_err| {
                debug!(%prv_err, %pub_err, "extended key rejected");
                anyhow!(pub_err).context("invalid extended key")
            })?;
            let node = xpub.derive_path(&path)?;
            describe_public(network, &node)
        }
    };

    if json_out {
        return print_json(&value);
    }
    if let Some(fields) = value.as_object() {
        for (name, field) in fields {
            match field {
                serde_json::Value::String(s) => println!("{name:<18} {s}"),
                serde_json::Value::Object(_) => {
                    println!("{name}:");
                    if let Some(inner) = field.as_object() {
                        for (k, v) in inner {
                            println!("  {k:<16} {}", v.as_str().unwrap_or_default());
                        }
                    }
                }
                other => println!("{name:<18} {other}"),
            }
        }
    }
    Ok(())
}

fn run(args: Args) -> Result<()> {
    let network = network_of(&args);
    match &args.command {
        Command::Mnemonic(cmd) => run_mnemonic(cmd, args.json),
        Command::Seed {
            mnemonic,
            passphrase,
        } => run_seed(mnemonic, &passphrase.passphrase, args.json),
        Command::Derive(d) => run_derive(d, network, args.json),
        Command::Address { input, parse } => run_address(input, *parse, network, args.json),
        Command::Wif(cmd) => run_wif(cmd, network, args.json),
        Command::Xkey(cmd) => run_xkey(cmd, args.json),
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("Error: {e:#}");
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}
