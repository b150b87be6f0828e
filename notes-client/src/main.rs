use notes_client::{NoteDraft, NoteMirror, NotesApi};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let base_url =
        std::env::var("NOTES_API_URL").unwrap_or_else(|_| "http://127.0.0.1:3000/api".to_string());

    let mut mirror = NoteMirror::new(NotesApi::new(base_url.clone())?);
    println!("Using notes API at {base_url}\n");

    // Load
    println!("1. Loading notes...");
    mirror.load().await;
    println!("{}", mirror.view());

    // Create
    println!("2. Creating a note...");
    mirror.open_editor(None);
    let created = mirror
        .save(&NoteDraft::new("Shopping", "Milk, bread"))
        .await?;
    println!("Created note {}\n", created.id);

    // Update
    println!("3. Editing the note...");
    let mut draft = mirror.open_editor(Some(&created.id));
    draft.content.push_str(", eggs");
    mirror.save(&draft).await?;
    println!("{}", mirror.view());

    // Delete
    println!("4. Deleting the note...");
    let deleted = mirror
        .confirm_delete(&created.id, |note| {
            println!("Deleting \"{}\"", note.title);
            true
        })
        .await;
    println!("Deleted: {deleted}\n");
    println!("{}", mirror.view());

    Ok(())
}
