/// tfidex API demo
///
/// Demonstrates the main server operations:
/// - Adding documents with ratings and status
/// - Ranked search with plus and minus words
/// - Matching, removal and deduplication
/// - Request statistics and batch queries

use tfidex::core::search_server::SearchServer;
use tfidex::core::types::{DocumentStatus, ExecutionPolicy};
use tfidex::parallel::process_queries::{process_queries, process_queries_joined};
use tfidex::search::duplicates::remove_duplicates;
use tfidex::search::request_queue::RequestQueue;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("Step 1: Creating server...");
    let mut server = SearchServer::new("and in on the with")?;

    println!("Step 2: Adding documents...");
    server.add_document(1, "white cat and fashionable collar", DocumentStatus::Actual, &[8, -3])?;
    server.add_document(2, "fluffy cat fluffy tail", DocumentStatus::Actual, &[7, 2, 7])?;
    server.add_document(3, "well groomed dog expressive eyes", DocumentStatus::Actual, &[5, -12, 2, 1])?;
    server.add_document(4, "well groomed starling eugene", DocumentStatus::Banned, &[9])?;
    server.add_document(5, "fluffy tail fluffy cat", DocumentStatus::Actual, &[1])?;
    println!("  {} documents indexed\n", server.document_count());

    println!("Step 3: Searching 'fluffy well groomed cat'...");
    for document in server.find_top_documents("fluffy well groomed cat")? {
        println!("  {}", document);
    }

    println!("\nStep 4: Banned documents only...");
    for document in server.find_top_documents_with_status("fluffy well groomed cat", DocumentStatus::Banned)? {
        println!("  {}", document);
    }

    println!("\nStep 5: Even ids, parallel...");
    let even = server.find_top_documents_with(
        ExecutionPolicy::Parallel,
        "fluffy well groomed cat",
        |id, _, _| id.value() % 2 == 0,
    )?;
    for document in even {
        println!("  {}", document);
    }

    println!("\nStep 6: Matching 'fluffy cat -collar'...");
    for id in server.document_ids().collect::<Vec<_>>() {
        let (words, status) = server.match_document("fluffy cat -collar", id.value())?;
        println!("  document {} ({:?}): {:?}", id, status, words);
    }

    println!("\nStep 7: Request statistics...");
    {
        let mut queue = RequestQueue::with_window(&server, 3);
        queue.add_find_request("empty request")?;
        queue.add_find_request("fluffy cat")?;
        queue.add_find_request("sparrow")?;
        queue.add_find_requests(&["fluffy", "owl"])?;
        println!("  {}", serde_json::to_string(&queue.summary())?);
    }

    println!("\nStep 8: Batch queries...");
    let queries = ["fluffy cat", "groomed dog -eyes", "collar"];
    for (query, documents) in queries.iter().zip(process_queries(&server, &queries)?) {
        println!("  '{}' -> {} documents", query, documents.len());
    }
    println!("  joined: {} documents", process_queries_joined(&server, &queries)?.len());

    println!("\nStep 9: Removing duplicates...");
    let removed = remove_duplicates(&mut server);
    println!("  removed {:?}, {} documents left", removed, server.document_count());

    server.remove_document_with(ExecutionPolicy::Parallel, 1);
    println!("  after removing 1: {} documents left", server.document_count());

    Ok(())
}
