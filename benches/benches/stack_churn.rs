// Copyright 2025 the Stackline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::time::Duration;

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Rect;
use stackline::{
    Extras, HostId, NavigationController, Options, PanelBehavior, PanelFactory, PanelId,
    PanelList, SlideAnimator, SlideConfig,
};
use stackline_surface::Surface;

struct Blank;

impl PanelBehavior for Blank {}

fn blank() -> PanelFactory {
    PanelFactory::new("blank", |_| Ok(Box::new(Blank)))
}

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }
}

fn bench_push_pop(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_pop");
    let factory = blank();
    for &depth in &[4_usize, 32, 256] {
        group.throughput(Throughput::Elements(depth as u64));
        group.bench_function(format!("list_depth{depth}"), |b| {
            b.iter_batched(
                || NavigationController::new(HostId::new(1), PanelList::new()),
                |nav| {
                    let no_anim = Options::new().no_animation();
                    for _ in 0..depth {
                        nav.start_panel(&factory, no_anim, Extras::new());
                    }
                    while let Some(top) = nav.top() {
                        nav.finish_panel(&top, no_anim);
                    }
                    black_box(nav.len())
                },
                BatchSize::SmallInput,
            );
        });
        group.bench_function(format!("surface_depth{depth}"), |b| {
            b.iter_batched(
                || {
                    NavigationController::new(
                        HostId::new(1),
                        Surface::<PanelId>::new(Rect::new(0.0, 0.0, 360.0, 640.0)),
                    )
                },
                |nav| {
                    let no_anim = Options::new().no_animation();
                    for _ in 0..depth {
                        nav.start_panel(&factory, no_anim, Extras::new());
                    }
                    nav.on_destroy();
                    black_box(nav.with_container_mut(Surface::take_damage))
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_random_ops(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_ops");
    let factory = blank();
    let ops = 1_000;
    group.throughput(Throughput::Elements(ops as u64));
    group.bench_function("start_finish_front_mix", |b| {
        b.iter_batched(
            || {
                (
                    NavigationController::new(HostId::new(1), PanelList::new()),
                    Rng::new(0x5eed),
                )
            },
            |(nav, mut rng)| {
                let no_anim = Options::new().no_animation();
                for _ in 0..ops {
                    let len = nav.len();
                    match rng.below(4) {
                        0 | 1 => {
                            nav.start_panel(&factory, no_anim, Extras::new());
                        }
                        2 if len > 0 => {
                            let panel = nav.get_panels().swap_remove(rng.below(len));
                            nav.finish_panel(&panel, no_anim);
                        }
                        _ if len > 0 => {
                            let panel = nav.get_panels().swap_remove(rng.below(len));
                            nav.bring_to_front(&panel);
                        }
                        _ => {}
                    }
                }
                black_box(nav.len())
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

fn bench_slide_frames(c: &mut Criterion) {
    let mut group = c.benchmark_group("slide");
    let factory = blank();
    group.bench_function("push_then_settle_60fps", |b| {
        b.iter_batched(
            || {
                let nav = NavigationController::builder(
                    HostId::new(1),
                    Surface::<PanelId>::new(Rect::new(0.0, 0.0, 360.0, 640.0)),
                )
                .animator(SlideAnimator::new(SlideConfig::default()))
                .build();
                nav.start_panel(&factory, Options::new(), Extras::new());
                nav
            },
            |nav| {
                nav.start_panel(&factory, Options::new(), Extras::new());
                let mut frames = 0_u32;
                while nav.advance_animations(Duration::from_millis(16)) {
                    frames += 1;
                }
                black_box(frames)
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(benches, bench_push_pop, bench_random_ops, bench_slide_frames);
criterion_main!(benches);
