use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use vm_intel_merge::pipeline::{self, RunOptions};
use vm_intel_merge::resolver::Resolver;
use vm_intel_merge::table::Table;

fn generate_tables(rows: usize) -> (Table, Table) {
    let mut inventory = Table::new(
        ["Name", "Notes", "OS Version", "DNS Name"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
    );
    let mut discovery = Table::new(
        ["Host", "Discovered App", "Feature Ports"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
    );
    for i in 0..rows {
        let name = format!("vm{i:05}");
        let (notes, os, dns) = match i % 4 {
            0 => (format!("RITM{i:07} Payroll"), "", ""),
            1 => (String::new(), "CentOS 7", ""),
            2 => (String::new(), "", "prd-sql.corp"),
            _ => (String::new(), "Ubuntu 22.04", "app.corp"),
        };
        if i % 5 != 0 {
            inventory
                .push_row(vec![name.clone(), notes, os.to_string(), dns.to_string()])
                .expect("inventory row");
        }
        let app = if i % 7 == 0 { "Exchange_Recognized" } else { "" };
        let ports = match i % 3 {
            0 => "99, 80, 443",
            1 => "abc, 12345",
            _ => "",
        };
        discovery
            .push_row(vec![format!("{name}:8443"), app.to_string(), ports.to_string()])
            .expect("discovery row");
    }
    (inventory, discovery)
}

fn bench_resolve(c: &mut Criterion) {
    let (inventory, discovery) = generate_tables(50_000);
    let resolver = Resolver::default();
    let (merged, _) = pipeline::merge(&discovery, &inventory).expect("merge");

    let mut group = c.benchmark_group("resolve");

    group.bench_function("resolve_merged_rows", |b| {
        b.iter_batched(
            || (),
            |_| pipeline::resolve(&merged, &resolver, RunOptions::default()),
            BatchSize::SmallInput,
        );
    });

    group.bench_function("full_run", |b| {
        b.iter_batched(
            || (),
            |_| {
                pipeline::run(&inventory, &discovery, &resolver, RunOptions::default())
                    .expect("pipeline run")
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_resolve);
criterion_main!(benches);
