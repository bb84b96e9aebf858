//! Macro-generated test suite for `TransactionRepository` contract validation.
//!
//! The `repository_contract_tests!` macro generates a test module that
//! validates any store implementing both `TransactionRepository` and
//! `TransactionImporter` against the read contract: predicate semantics,
//! ordering, paging, aggregation, distinct values and concurrent reads.
//! Each test imports the shared dataset (see the parent module) into a
//! fresh store, so every backend is checked against the same numbers.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//!
//! use storage_harness::*;
//! use sales_query::storage::InMemoryTransactionRepository;
//!
//! repository_contract_tests!(InMemoryTransactionRepository::new());
//! ```

/// Generate a full `TransactionRepository` conformance test suite.
///
/// `$factory` must evaluate to an empty store implementing
/// `TransactionRepository + TransactionImporter + 'static`. It is
/// re-evaluated for each test to ensure isolation.
#[macro_export]
macro_rules! repository_contract_tests {
    ($factory:expr) => {
        mod repository_contract_tests {
            use super::*;
            use sales_query::core::{
                FacetColumn, FilterSpecification, PageWindow, PredicateSet, SortDirection,
                SortKey, SortOrder, SummaryStats, TransactionImporter, TransactionRepository,
            };
            use std::sync::Arc;

            fn predicates(spec: FilterSpecification) -> PredicateSet {
                PredicateSet::from_spec(&spec)
            }

            fn all_rows() -> PageWindow {
                PageWindow::new(1, 1000)
            }

            async fn seeded_ids(
                repo: &dyn TransactionRepository,
                spec: FilterSpecification,
            ) -> Vec<String> {
                let rows = repo
                    .fetch(&predicates(spec), SortOrder::default(), all_rows())
                    .await
                    .unwrap();
                sorted_ids(&rows)
            }

            // ==================================================================
            // Counting & import
            // ==================================================================

            #[tokio::test]
            async fn test_empty_store() {
                let repo = $factory;
                assert_eq!(repo.record_count().await.unwrap(), 0);
                assert_eq!(repo.count(&PredicateSet::match_all()).await.unwrap(), 0);

                let rows = repo
                    .fetch(&PredicateSet::match_all(), SortOrder::default(), PageWindow::default())
                    .await
                    .unwrap();
                assert!(rows.is_empty());
            }

            #[tokio::test]
            async fn test_import_and_count_all() {
                let repo = $factory;
                repo.import(&dataset()).await.unwrap();

                assert_eq!(repo.record_count().await.unwrap(), DATASET_SIZE as u64);
                assert_eq!(
                    repo.count(&PredicateSet::match_all()).await.unwrap(),
                    DATASET_SIZE as u64
                );
            }

            #[tokio::test]
            async fn test_round_trips_every_attribute() {
                let repo = $factory;
                repo.import(&[dataset_row(7)]).await.unwrap();

                let rows = repo
                    .fetch(&PredicateSet::match_all(), SortOrder::default(), PageWindow::default())
                    .await
                    .unwrap();
                assert_eq!(rows, vec![dataset_row(7)]);
            }

            // ==================================================================
            // Predicates
            // ==================================================================

            #[tokio::test]
            async fn test_region_set_membership() {
                let repo = $factory;
                repo.import(&dataset()).await.unwrap();

                let spec = FilterSpecification::all().with_regions(["North", "South"]);
                assert_eq!(repo.count(&predicates(spec.clone())).await.unwrap(), 13);
                assert_eq!(seeded_ids(&repo, spec.clone()).await, expected_ids(&spec));
            }

            #[tokio::test]
            async fn test_gender_is_exact() {
                let repo = $factory;
                repo.import(&dataset()).await.unwrap();

                let male = FilterSpecification::all().with_gender("Male");
                assert_eq!(repo.count(&predicates(male)).await.unwrap(), 12);

                let lowercase = FilterSpecification::all().with_gender("male");
                assert_eq!(repo.count(&predicates(lowercase)).await.unwrap(), 0);
            }

            #[tokio::test]
            async fn test_search_name_case_insensitive() {
                let repo = $factory;
                repo.import(&dataset()).await.unwrap();

                let spec = FilterSpecification::all().with_search("ada LOVE");
                assert_eq!(seeded_ids(&repo, spec).await, vec!["TX-007"]);
            }

            #[tokio::test]
            async fn test_search_phone() {
                let repo = $factory;
                repo.import(&dataset()).await.unwrap();

                let spec = FilterSpecification::all().with_search("00012");
                assert_eq!(seeded_ids(&repo, spec).await, vec!["TX-012"]);
            }

            #[tokio::test]
            async fn test_search_keeps_surrounding_whitespace() {
                let repo = $factory;
                repo.import(&dataset()).await.unwrap();

                let spec = FilterSpecification::all().with_search(" Lovelace");
                assert_eq!(seeded_ids(&repo, spec).await, vec!["TX-007"]);

                for needle in ["Lovelace ", " Ada", "Rossi "] {
                    let spec = FilterSpecification::all().with_search(needle);
                    assert_eq!(repo.count(&predicates(spec)).await.unwrap(), 0, "{:?}", needle);
                }
            }

            #[tokio::test]
            async fn test_whitespace_only_search_matches_everything() {
                let repo = $factory;
                repo.import(&dataset()).await.unwrap();

                let spec = FilterSpecification::all().with_search("   ");
                assert_eq!(
                    repo.count(&predicates(spec)).await.unwrap(),
                    DATASET_SIZE as u64
                );
            }

            #[tokio::test]
            async fn test_search_wildcards_are_literal() {
                let repo = $factory;
                repo.import(&dataset()).await.unwrap();

                for needle in ["%", "_", "Customer_0"] {
                    let spec = FilterSpecification::all().with_search(needle);
                    assert_eq!(repo.count(&predicates(spec)).await.unwrap(), 0, "{}", needle);
                }
            }

            #[tokio::test]
            async fn test_tags_require_every_tag() {
                let repo = $factory;
                repo.import(&dataset()).await.unwrap();

                let sale = FilterSpecification::all().with_tags(["Sale"]);
                assert_eq!(repo.count(&predicates(sale)).await.unwrap(), 15);

                let sale_and_clearance = FilterSpecification::all().with_tags(["Sale", "Clearance"]);
                assert_eq!(
                    seeded_ids(&repo, sale_and_clearance).await,
                    vec!["TX-001", "TX-006", "TX-011", "TX-016", "TX-021"]
                );

                let red_and_sale = FilterSpecification::all().with_tags(["red", "Sale"]);
                assert_eq!(repo.count(&predicates(red_and_sale)).await.unwrap(), 5);
            }

            #[tokio::test]
            async fn test_tags_are_case_sensitive() {
                let repo = $factory;
                repo.import(&dataset()).await.unwrap();

                let spec = FilterSpecification::all().with_tags(["sale"]);
                assert_eq!(repo.count(&predicates(spec)).await.unwrap(), 0);
            }

            #[tokio::test]
            async fn test_age_bounds_inclusive() {
                let repo = $factory;
                repo.import(&dataset()).await.unwrap();

                // ages 30..=40 are rows 6..=11
                let spec = FilterSpecification::all().with_age_range(30, 40);
                assert_eq!(
                    seeded_ids(&repo, spec).await,
                    vec!["TX-006", "TX-007", "TX-008", "TX-009", "TX-010", "TX-011"]
                );

                let min_only = FilterSpecification::all().with_age_range(64, 0);
                assert_eq!(repo.count(&predicates(min_only)).await.unwrap(), 3);
            }

            #[tokio::test]
            async fn test_date_range_needs_both_ends() {
                let repo = $factory;
                repo.import(&dataset()).await.unwrap();

                let january = FilterSpecification::all().with_date_range("2024-01-01", "2024-01-31");
                let ids = seeded_ids(&repo, january).await;
                assert_eq!(ids.len(), 24);
                assert!(!ids.contains(&"TX-001".to_string()));

                let open_ended = FilterSpecification::all().with_start_date("2024-01-01");
                assert_eq!(
                    repo.count(&predicates(open_ended)).await.unwrap(),
                    DATASET_SIZE as u64
                );
            }

            #[tokio::test]
            async fn test_combined_filters_match_row_evaluation() {
                let repo = $factory;
                repo.import(&dataset()).await.unwrap();

                let spec = FilterSpecification::all()
                    .with_categories(["Electronics", "Beauty"])
                    .with_payment_methods(["UPI", "Cash"])
                    .with_gender("Female")
                    .with_age_range(20, 60);

                let ids = seeded_ids(&repo, spec.clone()).await;
                assert!(!ids.is_empty());
                assert_eq!(ids, expected_ids(&spec));
            }

            // ==================================================================
            // Ordering & paging
            // ==================================================================

            #[tokio::test]
            async fn test_default_order_is_newest_first() {
                let repo = $factory;
                repo.import(&dataset()).await.unwrap();

                let rows = repo
                    .fetch(&PredicateSet::match_all(), SortOrder::default(), PageWindow::new(1, 3))
                    .await
                    .unwrap();
                assert_eq!(ids(&rows), vec!["TX-025", "TX-024", "TX-023"]);
            }

            #[tokio::test]
            async fn test_sort_quantity_with_id_tie_break() {
                let repo = $factory;
                repo.import(&dataset()).await.unwrap();

                let order = SortOrder::new(SortKey::Quantity, SortDirection::Asc);
                let rows = repo
                    .fetch(&PredicateSet::match_all(), order, all_rows())
                    .await
                    .unwrap();

                assert_eq!(rows.len(), DATASET_SIZE);
                for pair in rows.windows(2) {
                    let (a, b) = (&pair[0], &pair[1]);
                    assert!(
                        (a.sales.quantity, &a.transaction_id) < (b.sales.quantity, &b.transaction_id),
                        "{} before {}",
                        a.transaction_id,
                        b.transaction_id
                    );
                }
                // quantity 1 rows are the multiples of four
                assert_eq!(rows[0].transaction_id, "TX-004");
            }

            #[tokio::test]
            async fn test_sort_customer_name() {
                let repo = $factory;
                repo.import(&dataset()).await.unwrap();

                let asc = SortOrder::new(SortKey::CustomerName, SortDirection::Asc);
                let rows = repo
                    .fetch(&PredicateSet::match_all(), asc, PageWindow::new(1, 2))
                    .await
                    .unwrap();
                assert_eq!(rows[0].customer.name, "Ada Lovelace");
                assert_eq!(rows[1].customer.name, "Customer 01");

                let desc = SortOrder::new(SortKey::CustomerName, SortDirection::Desc);
                let rows = repo
                    .fetch(&PredicateSet::match_all(), desc, PageWindow::new(1, 2))
                    .await
                    .unwrap();
                assert_eq!(rows[0].customer.name, "bianca Rossi");
                assert_eq!(rows[1].customer.name, "Customer 25");
            }

            #[tokio::test]
            async fn test_sort_customer_name_is_code_point_order() {
                let repo = $factory;
                repo.import(&dataset()).await.unwrap();

                let asc = SortOrder::new(SortKey::CustomerName, SortDirection::Asc);
                let rows = repo
                    .fetch(&PredicateSet::match_all(), asc, all_rows())
                    .await
                    .unwrap();

                let names: Vec<&str> = rows.iter().map(|tx| tx.customer.name.as_str()).collect();
                let mut expected = names.clone();
                expected.sort();
                assert_eq!(names, expected);
                assert_eq!(names.last().copied(), Some("bianca Rossi"));
            }

            #[tokio::test]
            async fn test_pages_partition_results() {
                let repo = $factory;
                repo.import(&dataset()).await.unwrap();

                let mut seen = Vec::new();
                for (page, expected_len) in [(1, 10), (2, 10), (3, 5), (4, 0)] {
                    let rows = repo
                        .fetch(
                            &PredicateSet::match_all(),
                            SortOrder::default(),
                            PageWindow::new(page, 10),
                        )
                        .await
                        .unwrap();
                    assert_eq!(rows.len(), expected_len, "page {}", page);
                    seen.extend(ids(&rows));
                }

                let unique: std::collections::BTreeSet<_> = seen.iter().collect();
                assert_eq!(unique.len(), DATASET_SIZE);
            }

            // ==================================================================
            // Aggregation
            // ==================================================================

            #[tokio::test]
            async fn test_aggregate_all() {
                let repo = $factory;
                repo.import(&dataset()).await.unwrap();

                let stats = repo.aggregate(&PredicateSet::match_all()).await.unwrap();
                assert_eq!(
                    stats,
                    SummaryStats {
                        total_units_sold: 62,
                        total_amount: 6200.0,
                        total_discount: 130.0,
                        total_transactions: 25,
                    }
                );
            }

            #[tokio::test]
            async fn test_aggregate_filtered() {
                let repo = $factory;
                repo.import(&dataset()).await.unwrap();

                // North rows are the multiples of four: quantity 1, no discount
                let spec = FilterSpecification::all().with_regions(["North"]);
                let stats = repo.aggregate(&predicates(spec)).await.unwrap();
                assert_eq!(stats.total_transactions, 6);
                assert_eq!(stats.total_units_sold, 6);
                assert_eq!(stats.total_amount, 600.0);
                assert_eq!(stats.total_discount, 0.0);
            }

            #[tokio::test]
            async fn test_aggregate_no_match_is_zero() {
                let repo = $factory;
                repo.import(&dataset()).await.unwrap();

                let spec = FilterSpecification::all().with_regions(["Atlantis"]);
                let stats = repo.aggregate(&predicates(spec)).await.unwrap();
                assert_eq!(stats, SummaryStats::default());
            }

            // ==================================================================
            // Distinct values
            // ==================================================================

            #[tokio::test]
            async fn test_distinct_values() {
                let repo = $factory;
                repo.import(&dataset()).await.unwrap();

                let mut regions = repo.distinct_values(FacetColumn::Region).await.unwrap();
                regions.sort();
                assert_eq!(regions, vec!["East", "North", "South", "West"]);

                let mut methods = repo.distinct_values(FacetColumn::PaymentMethod).await.unwrap();
                methods.sort();
                assert_eq!(methods, vec!["Cash", "Credit Card", "UPI"]);

                let mut tags = repo.distinct_values(FacetColumn::Tags).await.unwrap();
                tags.retain(|t| !t.is_empty());
                tags.sort();
                assert_eq!(
                    tags,
                    vec!["Electronics, Sale", "Sale, Clearance", "organic, fresh", "red, Sale"]
                );
            }

            // ==================================================================
            // Concurrency
            // ==================================================================

            #[tokio::test]
            async fn test_concurrent_reads() {
                let repo = Arc::new($factory);
                repo.import(&dataset()).await.unwrap();

                let mut handles = Vec::new();
                for _ in 0..8 {
                    let repo = repo.clone();
                    handles.push(tokio::spawn(async move {
                        let count = repo.count(&PredicateSet::match_all()).await.unwrap();
                        let stats = repo.aggregate(&PredicateSet::match_all()).await.unwrap();
                        (count, stats.total_transactions)
                    }));
                }

                for handle in handles {
                    let (count, total) = handle.await.unwrap();
                    assert_eq!(count, DATASET_SIZE as u64);
                    assert_eq!(total, DATASET_SIZE as u64);
                }
            }
        }
    };
}
