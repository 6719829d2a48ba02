use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{rngs::SmallRng, SeedableRng};
use snake_lottery::config::Config;
use snake_lottery::lottery::{Lottery, Phase, Signal};
use snake_lottery::render::assets::Assets;
use snake_lottery::terminal::canvas::TextCanvas;

fn fixture() -> Config {
    let raw = include_str!("../fixtures/seeded.json");
    let config: Config = serde_json::from_str(raw).expect("the json literal is valid");
    config.validate().expect("the fixture is valid");
    config
}

fn full_draw(config: &Config, number: u32) -> usize {
    let mut lottery = Lottery::new(config.clone(), SmallRng::seed_from_u64(7))
        .expect("valid")
        .with_number(number);
    let mut ticks = 1;
    lottery.tick(Some(Signal::Start));
    while lottery.phase() != Phase::AwaitRestart {
        lottery.tick(None);
        ticks += 1;
    }
    ticks
}

fn bench_full_draw(c: &mut Criterion) {
    let config = fixture();
    c.bench_function("full draw of 288", |b| {
        b.iter(|| full_draw(black_box(&config), black_box(288)))
    });
}

fn bench_paint_frame(c: &mut Criterion) {
    let config = fixture();
    let mut lottery = Lottery::new(config.clone(), SmallRng::seed_from_u64(7))
        .expect("valid")
        .with_number(123);
    lottery.tick(Some(Signal::Start));
    for _ in 0..40 {
        lottery.tick(None);
    }
    let mut canvas = TextCanvas::for_window(config.window);
    let mut assets = Assets::builtin();
    c.bench_function("paint one hunting frame", |b| {
        b.iter(|| {
            let scene = lottery.scene();
            scene.draw(black_box(&mut canvas), &mut assets);
        })
    });
}

criterion_group!(benches, bench_full_draw, bench_paint_frame);
criterion_main!(benches);
