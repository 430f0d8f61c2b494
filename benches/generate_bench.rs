use {
    breeze::{
        BuildConfig, CancelToken, Engine, OutputStyle, PluginCatalog,
        engine::generate_stylesheet,
        generate::GeneratorOptions,
        plugin::{PluginRegistry, VariantOptions},
        scan::{TokenSet, extract::tokens_of},
        theme::{ThemeResolver, ThemeSpec},
    },
    criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main},
    std::{fs, hint::black_box, time::Duration},
    tempfile::TempDir,
};

/// a template using a spread of utilities and variants
const TEMPLATE: &str = r#"
<nav class="flex items-center justify-between px-4 py-2 bg-white dark:bg-gray-900 shadow-md">
  <a class="text-lg font-bold text-blue-600 hover:text-blue-800 md:text-xl">breeze</a>
  <ul class="hidden md:flex gap-4 space-x-2">
    <li class="rounded-lg px-3 py-1 hover:bg-blue-500/50 focus:outline-none">home</li>
    <li class="w-[calc(100%-1rem)] -mt-2 lg:hover:underline [mask-type:luminance]">docs</li>
  </ul>
</nav>
"#;

fn template_of(copies: usize) -> String {
    (0..copies)
        .map(|i| TEMPLATE.replace("px-4", &format!("px-{}", i % 12)))
        .collect()
}

fn bench_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("extraction");

    for copies in [1, 10, 100] {
        let text = template_of(copies);

        group.bench_with_input(BenchmarkId::new("tokens_of", copies), &text, |b, text| {
            b.iter(|| tokens_of(black_box(text)))
        });
    }

    group.finish();
}

fn bench_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("generation");

    let (theme, _) = ThemeResolver::with_base_theme()
        .unwrap()
        .resolve(&ThemeSpec::new())
        .unwrap();
    let plugins = PluginCatalog::new().resolve(&["preflight", "core"]).unwrap();
    let (registry, _) =
        PluginRegistry::compose(&plugins, &theme, &VariantOptions::default(), ':').unwrap();
    let options = GeneratorOptions::default();

    group.bench_function("compose_registry", |b| {
        b.iter(|| {
            PluginRegistry::compose(
                black_box(&plugins),
                &theme,
                &VariantOptions::default(),
                ':',
            )
            .unwrap()
        })
    });

    for copies in [1, 100] {
        let tokens: TokenSet = tokens_of(&template_of(copies));

        group.bench_with_input(
            BenchmarkId::new("generate_stylesheet/pretty", copies),
            &tokens,
            |b, tokens| {
                b.iter(|| {
                    generate_stylesheet(
                        black_box(tokens),
                        &theme,
                        &registry,
                        &options,
                        OutputStyle::Pretty,
                    )
                })
            },
        );
    }

    group.finish();
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    let runtime = tokio::runtime::Runtime::new().unwrap();

    for files in [10, 100] {
        let temp_dir = TempDir::new().unwrap();
        for i in 0..files {
            fs::write(temp_dir.path().join(format!("page_{}.html", i)), template_of(3)).unwrap();
        }

        group.bench_with_input(BenchmarkId::new("engine", files), &temp_dir, |b, dir| {
            b.to_async(&runtime).iter_batched(
                || {
                    Engine::new(
                        BuildConfig::new(dir.path())
                            .with_content("**/*.html")
                            .with_plugins(PluginCatalog::new().core()),
                    )
                },
                |engine| async move { engine.build(&CancelToken::new()).await.unwrap() },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group! {
    name = generate_bench;
    config = Criterion::default()
        .measurement_time(Duration::from_secs(5))
        .sample_size(200);
    targets = bench_extraction, bench_generation
}

criterion_group! {
    name = build_bench;
    config = Criterion::default()
        .measurement_time(Duration::from_secs(10))
        .sample_size(50);
    targets = bench_build
}

criterion_main!(generate_bench, build_bench);
