//! Demo board client.
//!
//! Drives the railsync library against a running board server the way the
//! reference mobile demos did: list posts with their responses, create posts
//! (optionally with replies attached), respond to a post, destroy a post,
//! and create a person with a brain full of thoughts in one nested request.
//!
//! Usage:
//!   railsync-demo --url http://localhost:3000 posts
//!   railsync-demo post "Dan" "hello world" --reply "Alice:first!"
//!   railsync-demo respond 7 "Bob" "me too"
//!   railsync-demo destroy 7
//!   railsync-demo person "Dan" --thought "i exist" --thought "do i?"

use anyhow::Result;
use clap::{Parser, Subcommand};
use railsync_client::{ClientConfig, RemoteClient, RemoteError};
use railsync_demo::{Brain, Person, Post, Response, Thought};
use railsync_model::RemoteId;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "railsync-demo")]
#[command(about = "Demo board client for railsync")]
struct Args {
    /// Base URL of the board server
    #[arg(long, default_value = "http://localhost:3000")]
    url: String,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every post with its responses
    Posts,
    /// Create a post, optionally with replies ("author:content")
    Post {
        author: String,
        content: String,
        #[arg(long = "reply")]
        replies: Vec<String>,
    },
    /// Add a response to an existing post
    Respond {
        post_id: i64,
        author: String,
        content: String,
    },
    /// Destroy a post (and, server-side, its responses)
    Destroy { post_id: i64 },
    /// Create a person with a brain holding the given thoughts
    Person {
        name: String,
        #[arg(long = "thought")]
        thoughts: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::WARN };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .compact()
        .init();

    let client = RemoteClient::new(ClientConfig::new(args.url));

    let outcome = match args.command {
        Command::Posts => list_posts(&client).await,
        Command::Post {
            author,
            content,
            replies,
        } => create_post(&client, author, content, &replies).await,
        Command::Respond {
            post_id,
            author,
            content,
        } => respond(&client, post_id, author, content).await,
        Command::Destroy { post_id } => destroy(&client, post_id).await,
        Command::Person { name, thoughts } => create_person(&client, name, &thoughts).await,
    };

    // Surface failures the way the reference UIs did: one aggregated line.
    if let Err(error) = outcome {
        eprintln!("error: {}", error.display_message());
        std::process::exit(1);
    }
    Ok(())
}

async fn list_posts(client: &RemoteClient) -> Result<(), RemoteError> {
    let posts: Vec<Post> = client.fetch_all().await?;
    if posts.is_empty() {
        println!("no posts yet");
        return Ok(());
    }
    for post in &posts {
        let id = post.id.map_or_else(|| "?".to_string(), |id| id.to_string());
        let when = post
            .created_at
            .map(|ts| ts.format(" (%Y-%m-%d %H:%M)").to_string())
            .unwrap_or_default();
        println!("#{id} {}: {}{when}", post.author, post.content);
        for response in &post.responses {
            println!("    ↳ {}: {}", response.author, response.content);
        }
    }
    Ok(())
}

async fn create_post(
    client: &RemoteClient,
    author: String,
    content: String,
    replies: &[String],
) -> Result<(), RemoteError> {
    let mut post = Post::new(author, content);
    for reply in replies {
        let (author, content) = reply.split_once(':').unwrap_or((reply.as_str(), ""));
        post.responses.push(Response::new(author, content));
    }
    client.create(&mut post).await?;
    println!(
        "created post #{} with {} response(s)",
        post.id.expect("server assigned an id"),
        post.responses.len()
    );
    Ok(())
}

async fn respond(
    client: &RemoteClient,
    post_id: i64,
    author: String,
    content: String,
) -> Result<(), RemoteError> {
    let mut post: Post = client.fetch_one(RemoteId::new(post_id)).await?;
    post.responses.push(Response::new(author, content));
    client.update(&mut post).await?;
    println!("responded to post #{post_id}");
    Ok(())
}

async fn destroy(client: &RemoteClient, post_id: i64) -> Result<(), RemoteError> {
    let mut post = Post {
        id: Some(RemoteId::new(post_id)),
        ..Default::default()
    };
    client.destroy(&mut post).await?;
    println!("destroyed post #{post_id}");
    Ok(())
}

async fn create_person(
    client: &RemoteClient,
    name: String,
    thoughts: &[String],
) -> Result<(), RemoteError> {
    let mut person = Person::new(name);
    let mut brain = Brain::default();
    for thought in thoughts {
        brain.thoughts.push(Thought::new(thought));
    }
    person.brain = Some(brain);
    client.create(&mut person).await?;

    let thought_count = person.brain.as_ref().map_or(0, |b| b.thoughts.len());
    println!(
        "created person #{} with {thought_count} thought(s)",
        person.id.expect("server assigned an id")
    );
    Ok(())
}
