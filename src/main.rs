//! Scripted walkthrough of the EduChain simulation.
//!
//! Plays the scenario the simulator is built to demonstrate: create
//! transactions, mine them with live progress, inspect the chain, replay a
//! captured transaction in both secure and vulnerable modes, tamper with a
//! mined block, and watch the difficulty controller react. Wallet balances
//! are bookkeeping of this calling layer; the chain only knows transactions.

use anyhow::Result;
use educhain::crypto::pow::{self, MiningProgress};
use educhain::utils::{self, format};
use educhain::{Block, Blockchain, ChainConfig, Transaction};
use std::collections::HashMap;

fn main() -> Result<()> {
    utils::init_logging();

    let config = ChainConfig::from_env()?;
    let mut chain = Blockchain::with_config(config.clone());
    let mut wallets: HashMap<&str, i64> = HashMap::from([("Alice", 100), ("Bob", 0)]);

    println!("🔗 EduChain: proof-of-work blockchain simulator");
    print_status(&chain);

    // 1. Create a transaction and submit it with replay protection on.
    println!("\n1️⃣  Alice sends Bob 10 coins");
    let tx = Transaction::new("Alice", "Bob", 10);
    let captured = tx.clone(); // what a replay attacker would intercept
    chain.submit_transaction(tx, true)?;
    *wallets.entry("Alice").or_default() -= 10;
    *wallets.entry("Bob").or_default() += 10;
    print_pool(&chain);

    // 2. Mine the pending pool, reporting progress as the search runs.
    println!(
        "\n2️⃣  Mining zone (target: {} leading zeros, ~{} expected attempts)",
        chain.difficulty(),
        pow::expected_attempts(chain.difficulty())
    );
    let progress = |p: &MiningProgress| {
        println!(
            "   ⛏️  nonce {:>8} | {} | {:>10.0} H/s",
            p.nonce,
            format::short_hash(&p.hash),
            p.hash_rate
        );
    };
    let receipt = chain.mine_pending("Miner1", false, Some(&progress))?;
    println!("   ✅ {}", receipt);
    print_status(&chain);

    // 3. Replay attack with protection on: the captured transaction bounces.
    println!("\n3️⃣  Replay attack, secure mode");
    match chain.submit_transaction(captured.clone(), true) {
        Err(err) => println!("   ❌ {}", err),
        Ok(()) => println!("   ⚠️  attack succeeded, duplicate accepted"),
    }

    // 4. Chain inspector.
    println!("\n4️⃣  Chain explorer");
    for block in chain.blocks() {
        print_block(block);
    }

    // 5. Auto-adjusting difficulty over a few quick blocks.
    println!("\n5️⃣  Auto-adjust: target block time {:.1}s", config.target_block_time);
    for round in 0..3u64 {
        chain.submit_transaction(Transaction::new("Alice", "Bob", 1 + round), true)?;
        let receipt = chain.mine_pending("Miner1", true, None)?;
        println!("   {} → next difficulty {}", receipt, chain.difficulty());
    }

    // 6. Tamper with a mined block and let validation catch it.
    println!("\n6️⃣  Corrupting block 1");
    chain.corrupt_block(1, 999_999)?;
    match chain.is_valid() {
        Ok(()) => println!("   ✅ blockchain is valid"),
        Err(err) => println!("   ❌ {}", err),
    }

    // 7. Vulnerable mode on a fresh chain: the same replay goes through.
    println!("\n7️⃣  Replay attack, vulnerable mode (fresh chain)");
    let mut insecure = Blockchain::with_config(config);
    let tx = Transaction::new("Alice", "Bob", 10);
    insecure.submit_transaction(tx.clone(), false)?;
    insecure.submit_transaction(tx, false)?;
    println!(
        "   ⚠️  pool holds {} entries, ids equal: {}",
        insecure.pending().len(),
        insecure.pending()[0].id == insecure.pending()[1].id
    );

    println!("\nWallets (demo-layer bookkeeping): {:?}", wallets);
    Ok(())
}

fn print_status(chain: &Blockchain) {
    let validity = match chain.is_valid() {
        Ok(()) => "valid",
        Err(_) => "INVALID",
    };
    println!(
        "   blocks: {} | pending: {} | difficulty: {} | chain: {}",
        chain.height(),
        chain.pending().len(),
        chain.difficulty(),
        validity
    );
}

fn print_pool(chain: &Blockchain) {
    println!("   ⏳ pending transactions:");
    for tx in chain.pending() {
        println!(
            "      {} | {} -> {}: {} coins",
            format::short_hash(&tx.id),
            tx.sender,
            tx.receiver,
            tx.amount
        );
    }
}

fn print_block(block: &Block) {
    let kind = if block.index == 0 { "Genesis" } else { "Mined" };
    println!("   Block #{} [{}] - {}", block.index, kind, format::short_hash(&block.hash));
    println!("      timestamp:   {}", format::format_timestamp(block.timestamp));
    println!("      nonce:       {}", block.nonce);
    println!("      difficulty:  {}", block.difficulty);
    println!("      mining time: {}", format::format_duration(block.mining_time));
    println!("      prev hash:   {}", format::short_hash(&block.previous_hash));
    for tx in &block.transactions {
        println!(
            "      tx {} | {} -> {}: {} coins",
            format::short_hash(&tx.id),
            tx.sender,
            tx.receiver,
            tx.amount
        );
    }
}
