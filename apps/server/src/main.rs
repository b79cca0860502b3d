use anyhow::Context;
use valida_kernel::config::load_config;
use valida_kernel::domain::config::ApiConfig;
use valida_server::{Server, init_logger, runtime_config};

fn main() -> anyhow::Result<()> {
    let cfg: ApiConfig =
        load_config(Some("server")).context("Critical: Configuration is malformed")?;

    let _log = init_logger(env!("CARGO_PKG_NAME"), &cfg.logging)?;

    let runtime = valida_runtime::build_runtime_with_config(&runtime_config(&cfg.runtime))?;
    runtime.block_on(async { Server::builder().config(cfg).build()?.run().await })
}
