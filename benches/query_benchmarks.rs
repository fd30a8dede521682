//! Performance benchmarks for the analytics queries.
//!
//! This benchmark suite measures the query catalog over synthetic datasets:
//! - Partitioning employees by department
//! - Each catalog query on 10,000 employees
//! - Salary ranking as the dataset grows
//! - Delimited export of a ranked result
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chrono::NaiveDate;
use rust_decimal::Decimal;

use hive_analytics::config::QueryParameters;
use hive_analytics::export::Exporter;
use hive_analytics::models::{Department, Employee, Project};
use hive_analytics::partition::PartitionedEmployeeSet;
use hive_analytics::query::{Query, rank_salary_within_department};
use hive_analytics::session::QuerySession;

const DEPARTMENTS: [&str; 6] = ["Finance", "HR", "IT", "Legal", "Marketing", "Sales"];
const ROLES: [&str; 4] = ["Analyst", "Developer", "Manager", "Recruiter"];

/// Creates `count` employees spread over the departments, with a NULL
/// salary every 50th row and a NULL department every 97th.
fn create_employees(count: usize) -> Vec<Employee> {
    (0..count)
        .map(|i| Employee {
            emp_id: i as i64 + 1,
            name: Some(format!("Employee {}", i)),
            age: Some(22 + (i % 40) as u32),
            job_role: Some(ROLES[i % ROLES.len()].to_string()),
            salary: (i % 50 != 0).then(|| Decimal::from(30_000 + (i * 7919) % 90_000)),
            project: Some(Project::ALL[i % Project::ALL.len()]),
            join_date: NaiveDate::from_ymd_opt(2005 + (i % 20) as i32, 1 + (i % 12) as u32, 1),
            department: (i % 97 != 0).then(|| DEPARTMENTS[i % DEPARTMENTS.len()].to_string()),
        })
        .collect()
}

fn create_departments() -> Vec<Department> {
    // Legal has no record, so the join drops its employees.
    DEPARTMENTS
        .iter()
        .filter(|name| **name != "Legal")
        .enumerate()
        .map(|(i, name)| Department::new(i as i64 + 1, *name, "Bangalore"))
        .collect()
}

/// Benchmark: Partitioning 10,000 employees.
fn bench_partition(c: &mut Criterion) {
    let employees = create_employees(10_000);

    let mut group = c.benchmark_group("partition");
    group.throughput(Throughput::Elements(employees.len() as u64));
    group.bench_function("partition_10000", |b| {
        b.iter(|| black_box(PartitionedEmployeeSet::from_employees(black_box(&employees))))
    });
    group.finish();
}

/// Benchmark: Every catalog query on 10,000 employees.
fn bench_queries(c: &mut Criterion) {
    let session = QuerySession::new(
        create_employees(10_000),
        create_departments(),
        QueryParameters::default(),
    );

    let mut group = c.benchmark_group("queries");
    for query in Query::ALL {
        group.bench_function(query.name(), |b| {
            b.iter(|| black_box(session.run(black_box(query)).unwrap()))
        });
    }
    group.finish();
}

/// Benchmark: Salary ranking at various dataset sizes to understand scaling.
fn bench_rank_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank_scaling");

    for count in [100, 1_000, 10_000, 100_000].iter() {
        let partitions = PartitionedEmployeeSet::from_employees(&create_employees(*count));

        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::new("employees", count), count, |b, _| {
            b.iter(|| black_box(rank_salary_within_department(black_box(&partitions))))
        });
    }

    group.finish();
}

/// Benchmark: Delimited export of all salary ranks.
fn bench_export(c: &mut Criterion) {
    let session = QuerySession::new(
        create_employees(10_000),
        create_departments(),
        QueryParameters::default(),
    );
    let result = session.run(Query::SalaryRanks).unwrap();
    let exporter = Exporter::default();

    let mut group = c.benchmark_group("export");
    group.throughput(Throughput::Elements(result.len() as u64));
    group.bench_function("delimited_10000", |b| {
        b.iter(|| {
            let mut out = Vec::with_capacity(512 * 1024);
            exporter.write_to(&result, &mut out, "buffer").unwrap();
            black_box(out)
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_partition,
    bench_queries,
    bench_rank_scaling,
    bench_export,
);
criterion_main!(benches);
