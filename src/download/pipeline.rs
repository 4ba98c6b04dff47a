//! Run-level dispatch of posts to the orchestrator.

use std::sync::Arc;

use futures::StreamExt;
use tokio::task::JoinSet;

use crate::download::orchestrator::Orchestrator;
use crate::download::state::{PostReport, RunStats};
use crate::error::{Error, Result};
use crate::media::Post;
use crate::source::TimelineRequest;

/// Download a user's timeline.
///
/// Every post becomes an independent task. An in-band source error, or a
/// post whose retweet cannot be resolved, aborts the run: outstanding tasks
/// are cancelled and the error is returned.
pub async fn run_timeline(orchestrator: &Orchestrator) -> Result<RunStats> {
    let config = orchestrator.config();
    let handle = config
        .user
        .clone()
        .ok_or_else(|| Error::MissingConfig("user handle for timeline download".to_string()))?;

    let request = TimelineRequest {
        handle,
        limit: config.limit,
        media_only: config.only_media_tweets,
    };

    tracing::info!(
        "Downloading timeline of @{} (up to {} posts)",
        request.handle,
        request.limit
    );

    let mut posts = orchestrator.source().stream(&request).await?;
    let mut tasks: JoinSet<Result<PostReport>> = JoinSet::new();
    let mut stats = RunStats::default();
    let mut exhausted = false;

    while !exhausted || !tasks.is_empty() {
        tokio::select! {
            item = posts.next(), if !exhausted => match item {
                Some(Ok(post)) => dispatch(orchestrator, &mut tasks, post),
                Some(Err(e)) => {
                    tracing::error!("Post source failed: {}", e);
                    tasks.abort_all();
                    return Err(e);
                }
                None => exhausted = true,
            },
            Some(joined) = tasks.join_next(), if !tasks.is_empty() => match joined {
                Ok(Ok(report)) => stats.record(&report),
                Ok(Err(e)) => {
                    tracing::error!("Aborting run: {}", e);
                    tasks.abort_all();
                    return Err(e);
                }
                Err(e) => tracing::error!("Post task panicked: {}", e),
            },
            else => break,
        }
    }

    tracing::info!(
        "Timeline complete: {} posts, {} files downloaded",
        stats.posts_processed,
        stats.total_downloaded()
    );

    Ok(stats)
}

/// Download one post by id.
pub async fn run_single(orchestrator: &Orchestrator, id: &str) -> Result<RunStats> {
    tracing::info!("Downloading single post: {}", id);

    let report = orchestrator.process_single(id).await?;
    if report.is_empty() {
        tracing::info!("No media found in post {}", id);
    }

    let mut stats = RunStats::default();
    stats.record(&report);
    Ok(stats)
}

fn dispatch(orchestrator: &Orchestrator, tasks: &mut JoinSet<Result<PostReport>>, post: Post) {
    let orchestrator = orchestrator.clone();
    let post = Arc::new(post);

    tasks.spawn(async move {
        let config = orchestrator.config();

        let videos = async {
            if config.download_videos {
                orchestrator.process_videos(post.clone()).await
            } else {
                PostReport::new(&post.id)
            }
        };
        let images = async {
            if config.download_images {
                orchestrator.process_images(post.clone()).await
            } else {
                Ok(PostReport::new(&post.id))
            }
        };

        let (videos, images) = tokio::join!(videos, images);
        let mut report = images?;
        report.merge(videos);
        Ok::<_, Error>(report)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunConfig;
    use crate::download::media::Fetcher;
    use crate::media::MediaRef;
    use crate::source::mock::MockSource;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn orchestrator(config: RunConfig, source: MockSource) -> Orchestrator {
        let fetcher = Fetcher::new(&config).unwrap();
        Orchestrator::new(Arc::new(config), fetcher, Arc::new(source))
    }

    fn user_config(root: &std::path::Path) -> RunConfig {
        RunConfig {
            user: Some("someone".to_string()),
            output_root: root.to_path_buf(),
            ..Default::default()
        }
    }

    fn image_post(id: &str, url: String) -> Post {
        Post {
            id: id.to_string(),
            text: format!("post {}", id),
            images: vec![MediaRef::image(url)],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_timeline_downloads_every_post() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"img".to_vec()))
            .expect(2)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let source = MockSource {
            timeline: vec![
                Ok(image_post("1", format!("{}/media/a.jpg", server.uri()))),
                Ok(image_post("2", format!("{}/media/b.jpg", server.uri()))),
            ],
            ..Default::default()
        };
        let orch = orchestrator(user_config(dir.path()), source);

        let stats = run_timeline(&orch).await.unwrap();
        assert_eq!(stats.posts_processed, 2);
        assert_eq!(stats.images, 2);
        assert_eq!(stats.failed, 0);
        assert!(dir.path().join("img/a_post 1.jpg").is_file());
    }

    #[tokio::test]
    async fn test_second_run_skips_existing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/media/a.jpg"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"img".to_vec()))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let mut config = user_config(dir.path());
        config.skip_existing = true;
        let source = MockSource {
            timeline: vec![Ok(image_post("1", format!("{}/media/a.jpg", server.uri())))],
            ..Default::default()
        };
        let orch = orchestrator(config, source);

        let first = run_timeline(&orch).await.unwrap();
        assert_eq!(first.images, 1);

        let second = run_timeline(&orch).await.unwrap();
        assert_eq!(second.images, 0);
        assert_eq!(second.skipped, 1);
    }

    #[tokio::test]
    async fn test_in_band_error_aborts_run() {
        let dir = tempfile::tempdir().unwrap();
        let source = MockSource {
            timeline: vec![
                Ok(Post {
                    id: "1".to_string(),
                    ..Default::default()
                }),
                Err("rate limited".to_string()),
            ],
            ..Default::default()
        };
        let orch = orchestrator(user_config(dir.path()), source);

        let err = run_timeline(&orch).await.unwrap_err();
        assert!(err.is_source());
    }

    #[tokio::test]
    async fn test_unresolvable_retweet_aborts_run() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = user_config(dir.path());
        config.include_retweets = true;
        let source = MockSource {
            timeline: vec![Ok(Post {
                id: "9".to_string(),
                is_retweet: true,
                ..Default::default()
            })],
            ..Default::default()
        };
        let orch = orchestrator(config, source);

        assert!(matches!(
            run_timeline(&orch).await,
            Err(Error::NotFound(id)) if id == "9"
        ));
    }

    #[tokio::test]
    async fn test_failed_fetch_does_not_fail_run() {
        let dir = tempfile::tempdir().unwrap();
        let source = MockSource {
            timeline: vec![Ok(image_post("1", "http://127.0.0.1:1/a.jpg".to_string()))],
            ..Default::default()
        };
        let orch = orchestrator(user_config(dir.path()), source);

        let stats = run_timeline(&orch).await.unwrap();
        assert_eq!(stats.failed, 1);
    }

    #[tokio::test]
    async fn test_limit_bounds_posts() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = user_config(dir.path());
        config.limit = 1;
        let source = MockSource {
            timeline: vec![
                Ok(Post {
                    id: "1".to_string(),
                    ..Default::default()
                }),
                Ok(Post {
                    id: "2".to_string(),
                    ..Default::default()
                }),
            ],
            ..Default::default()
        };
        let orch = orchestrator(config, source);

        assert_eq!(run_timeline(&orch).await.unwrap().posts_processed, 1);
    }

    #[tokio::test]
    async fn test_run_single_flat_layout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"img".to_vec()))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let config = RunConfig {
            single_post_id: Some("3".to_string()),
            output_root: dir.path().to_path_buf(),
            ..Default::default()
        };
        let source = MockSource {
            posts: vec![image_post("3", format!("{}/media/c.jpg", server.uri()))],
            ..Default::default()
        };
        let orch = orchestrator(config, source);

        let stats = run_single(&orch, "3").await.unwrap();
        assert_eq!(stats.images, 1);
        assert!(dir.path().join("c_post 3.jpg").is_file());
    }
}
