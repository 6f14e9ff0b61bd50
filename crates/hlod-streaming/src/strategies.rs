//! Built-in streaming strategies.

use log::debug;

use hlod_core::{ChunkStore, HlodRoots, LowCell, LowRoot, Payload, StrategyConfig};

use crate::package::{PackageInput, build_high_root};
use crate::StreamingLayout;

/// Keeps every payload resident in memory; the whole low root loads eagerly
/// with the asset.
pub struct ResidentStreaming;

impl StreamingLayout for ResidentStreaming {
    fn package(&self, input: &PackageInput<'_>, _options: &StrategyConfig) -> HlodRoots {
        let cells = input
            .cells
            .iter()
            .map(|cell| LowCell {
                group: cell.group,
                bounds: cell.bounds,
                payloads: cell.meshes.iter().cloned().map(Payload::Inline).collect(),
            })
            .collect();

        HlodRoots {
            high: build_high_root(input.partition),
            low: LowRoot {
                range: input.range,
                cells,
                chunks: ChunkStore::new(),
            },
        }
    }
}

/// Moves every payload into the chunk store so runtime consumers can load
/// cells on demand by key instead of keeping all LOD geometry resident.
pub struct OnDemandStreaming;

impl StreamingLayout for OnDemandStreaming {
    fn package(&self, input: &PackageInput<'_>, _options: &StrategyConfig) -> HlodRoots {
        let mut chunks = ChunkStore::new();
        let cells = input
            .cells
            .iter()
            .map(|cell| LowCell {
                group: cell.group,
                bounds: cell.bounds,
                payloads: cell
                    .meshes
                    .iter()
                    .cloned()
                    .map(|mesh| Payload::Chunked(chunks.insert(mesh)))
                    .collect(),
            })
            .collect();

        debug!("packaged {} chunks for on-demand loading", chunks.len());
        HlodRoots {
            high: build_high_root(input.partition),
            low: LowRoot {
                range: input.range,
                cells,
                chunks,
            },
        }
    }
}
