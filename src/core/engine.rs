use crate::core::totals::{RequestTotalsService, TotalsOptions};
use crate::core::{CatalogLookup, RequestSource, Summary};
use crate::utils::error::Result;

pub struct TotalsEngine<R: RequestSource, C: CatalogLookup> {
    source: R,
    catalog: C,
    options: TotalsOptions,
}

impl<R: RequestSource, C: CatalogLookup> TotalsEngine<R, C> {
    pub fn new(source: R, catalog: C, options: TotalsOptions) -> Self {
        Self {
            source,
            catalog,
            options,
        }
    }

    pub async fn run(&self) -> Result<Summary> {
        tracing::info!("Loading requests...");
        let requests = self.source.load_requests().await?;
        let line_count: usize = requests.iter().map(|r| r.request_items.len()).sum();
        tracing::info!(
            "Totalling {} lines across {} requests (packs {})",
            line_count,
            requests.len(),
            if self.options.alternate_units_enabled {
                "enabled"
            } else {
                "disabled"
            }
        );

        let summary =
            RequestTotalsService::new(&self.catalog, self.options).calculate(&requests)?;
        tracing::info!("Produced {} item totals", summary.len());

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::catalog::InMemoryCatalog;
    use crate::domain::model::{CatalogItem, Request, RequestLine};
    use async_trait::async_trait;

    struct FixedSource(Vec<Request>);

    #[async_trait]
    impl RequestSource for FixedSource {
        async fn load_requests(&self) -> Result<Vec<Request>> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn test_run_totals_loaded_requests() {
        let source = FixedSource(vec![
            Request::new(1, vec![RequestLine::with_unit(1, 4, "pack")]),
            Request::new(2, vec![RequestLine::new(1, 6)]),
        ]);
        let catalog = InMemoryCatalog::new([CatalogItem::new(1, "Wipes")]);
        let options = TotalsOptions {
            alternate_units_enabled: true,
            ..TotalsOptions::default()
        };

        let engine = TotalsEngine::new(source, catalog, options);
        let summary = engine.run().await.unwrap();

        assert_eq!(
            summary.iter().collect::<Vec<_>>(),
            vec![("Wipes - packs", 4), ("Wipes", 6)]
        );
    }
}
