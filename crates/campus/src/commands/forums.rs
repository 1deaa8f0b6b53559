//! Forum moderation command handlers.

use tabled::Tabled;

use campus_core::Campus;
use campus_core::model::{Forum, ForumDraft, ForumPost};

use crate::cli::{ForumsArgs, ForumsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct ForumRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Course")]
    course: String,
    #[tabled(rename = "Posts")]
    posts: String,
}

impl From<&Forum> for ForumRow {
    fn from(f: &Forum) -> Self {
        Self {
            id: f.id.clone(),
            title: util::opt(f.title.as_deref()),
            course: util::reference(f.course.as_ref()),
            posts: f.posts_count.map_or_else(|| "-".into(), |n| n.to_string()),
        }
    }
}

#[derive(Tabled)]
struct PostRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Author")]
    author: String,
    #[tabled(rename = "Posted")]
    posted: String,
    #[tabled(rename = "Content")]
    content: String,
}

impl From<&ForumPost> for PostRow {
    fn from(p: &ForumPost) -> Self {
        let content = p.content.as_deref().unwrap_or("-");
        Self {
            id: p.id.clone(),
            author: util::reference(p.author.as_ref()),
            posted: util::date(p.created_at.as_ref()),
            content: content.chars().take(60).collect(),
        }
    }
}

fn detail(f: &Forum) -> String {
    output::detail_lines(&[
        ("ID", f.id.clone()),
        ("Title", f.title.clone().unwrap_or_default()),
        ("Course", util::reference(f.course.as_ref())),
        ("Created", util::date(f.created_at.as_ref())),
        ("Description", f.description.clone().unwrap_or_default()),
    ])
}

pub async fn handle(
    campus: &Campus,
    args: ForumsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ForumsCommand::List(list) => {
            let page = campus.list_forums(&util::list_query(&list)?).await?;
            let out = output::render_page(
                &global.output,
                &page,
                |f| ForumRow::from(f),
                |f| f.id.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ForumsCommand::Get { id } => {
            let forum = campus.get_forum(&id).await?;
            let out = output::render_single(&global.output, &forum, detail, |f| f.id.clone())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ForumsCommand::Create {
            title,
            description,
            course,
        } => {
            let forum = campus
                .create_forum(&ForumDraft {
                    title,
                    description,
                    course_id: course,
                })
                .await?;
            let out = output::render_single(&global.output, &forum, detail, |f| f.id.clone())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ForumsCommand::Delete { id } => {
            if !util::confirm(&format!("Delete forum {id} and all its posts?"), global.yes)? {
                return Ok(());
            }
            let message = campus.delete_forum(&id).await?;
            output::print_status(message.as_deref(), "Forum deleted", global.quiet);
            Ok(())
        }

        ForumsCommand::Posts { forum, list } => {
            let page = campus
                .forum_posts(&forum, &util::list_query(&list)?)
                .await?;
            let out = output::render_page(
                &global.output,
                &page,
                |p| PostRow::from(p),
                |p| p.id.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ForumsCommand::DeletePost { forum, post } => {
            if !util::confirm(&format!("Delete post {post}?"), global.yes)? {
                return Ok(());
            }
            let message = campus.delete_forum_post(&forum, &post).await?;
            output::print_status(message.as_deref(), "Post deleted", global.quiet);
            Ok(())
        }
    }
}
