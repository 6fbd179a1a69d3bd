//! A bootstrapped deployment and its entry points.

use anyhow::Context;

use prodparty_core::Pool;
use prodparty_production::{
    BomCatalog, EditSession, OnChangeTable, Production, ProductionMove, ProductionReader,
    StandardProduction, StockOwnerProduction,
};
use prodparty_stock::StandardMove;

use crate::{ModuleConfig, register};

pub type ProductionBehavior = StockOwnerProduction<StandardProduction>;

/// Everything needed to edit productions and check their moves.
#[derive(Debug)]
pub struct Deployment {
    pool: Pool,
    table: OnChangeTable,
    production: ProductionBehavior,
}

/// Initialize logging, build the model pool from `config`, register the
/// extensions and declare their change hooks.
pub fn bootstrap(config: &ModuleConfig, boms: BomCatalog) -> anyhow::Result<Deployment> {
    prodparty_observability::init(&config.log_filter);

    let mut pool = Pool::with_models(config.installed_models.iter().cloned());
    register(&mut pool).context("registering production_external_party")?;

    let mut table = OnChangeTable::host();
    ProductionBehavior::declare(&mut table);

    let production = StockOwnerProduction::new(StandardProduction::new(boms), &pool);
    tracing::info!(
        models = pool.models().count(),
        sales = pool.get("sale.sale").is_some(),
        "deployment ready"
    );
    Ok(Deployment {
        pool,
        table,
        production,
    })
}

impl Deployment {
    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    pub fn production(&self) -> &ProductionBehavior {
        &self.production
    }

    pub fn edit(&self, record: Production) -> EditSession<'_, ProductionBehavior> {
        EditSession::open(&self.production, &self.table, record)
    }

    /// Party checks for moves, reading productions from `productions`.
    pub fn move_checks<'a, R>(&self, productions: &'a R) -> ProductionMove<'a, StandardMove, R>
    where
        R: ProductionReader + ?Sized,
    {
        ProductionMove::new(StandardMove, productions)
    }
}
