//! Readers running alongside a writer only observe whole versions.

use super::helpers::{Registry, address, config_id, registry, sel};
use dispatch_registry::resolver::domain::{ModuleAddress, ModuleId, Version};
use rstest::rstest;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

const WAVES: u8 = 20;

#[rstest]
fn readers_never_observe_partial_seals(registry: Registry) {
    let cfg = config_id("live");
    let modules: Vec<ModuleId> = (1..=WAVES)
        .map(|n| registry.module(&format!("m{n}"), n, &[u32::from(n)]))
        .collect();
    let done = AtomicBool::new(false);

    thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                while !done.load(Ordering::Acquire) {
                    let ids = registry.resolver.list_module_ids(cfg, Version::LATEST, 0, 100);
                    assert_eq!(Some(ids.as_slice()), modules.get(..ids.len()));

                    let version = registry.resolver.latest_version(cfg);
                    if version.is_latest() {
                        continue;
                    }
                    let count = registry.resolver.module_count(cfg, version);
                    assert_eq!(count as u64, version.get());
                    for n in (1..=WAVES).take(count) {
                        assert_eq!(
                            registry.resolver.resolve(cfg, version, sel(u32::from(n))),
                            address(n)
                        );
                    }
                }
            });
        }

        for (index, module) in modules.iter().enumerate() {
            let sealed = registry
                .admin
                .create_batch_configuration(&registry.operator, cfg, &[*module], true)
                .expect("append and seal");
            assert_eq!(sealed.map(Version::get), Some(index as u64 + 1));
        }
        done.store(true, Ordering::Release);
    });

    assert_eq!(
        registry.resolver.latest_version(cfg),
        Version::new(u64::from(WAVES))
    );
    assert_eq!(
        registry.resolver.resolve(cfg, Version::new(1), sel(2)),
        ModuleAddress::UNSET
    );
}
