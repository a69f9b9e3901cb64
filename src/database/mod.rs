//! Database client command lines
//!
//! Queries and imports are delegated to the driver's own client (`mysql`,
//! `psql`); this module only builds their invocations.

use std::fmt;

use crate::core::{Connection, Driver};
use crate::process::{shell_quote, ProcessRunner};

const MASK: &str = "******";
const PASSWORD_FLAG: &str = "--password=";
const PASSWORD_ENV: &str = "PGPASSWORD";

/// A client program invocation for one connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientInvocation {
    pub program: &'static str,
    pub args: Vec<String>,
    pub env: Vec<(String, String)>,
}

impl ClientInvocation {
    /// Invocation that runs `query` against the connection's database
    pub fn query(connection: &Connection, query: &str) -> Self {
        match connection.driver {
            Driver::Mysql => Self {
                program: "mysql",
                args: vec![
                    format!("--user={}", connection.username),
                    format!("{}{}", PASSWORD_FLAG, connection.password),
                    format!("--host={}", connection.host),
                    format!("--port={}", connection.port),
                    connection.database.clone(),
                    "-e".to_string(),
                    query.to_string(),
                ],
                env: Vec::new(),
            },
            Driver::Pgsql => Self {
                program: "psql",
                args: vec![
                    "-w".to_string(),
                    "-U".to_string(),
                    connection.username.clone(),
                    "-h".to_string(),
                    connection.host.clone(),
                    "-p".to_string(),
                    connection.port.to_string(),
                    "-d".to_string(),
                    connection.database.clone(),
                    "-c".to_string(),
                    query.to_string(),
                ],
                env: vec![(PASSWORD_ENV.to_string(), connection.password.clone())],
            },
        }
    }

    /// Process runner carrying this invocation's environment
    pub fn runner(&self, working_dir: &std::path::Path) -> ProcessRunner {
        self.env
            .iter()
            .fold(ProcessRunner::new(working_dir), |runner, (key, value)| {
                runner.with_env(key.clone(), value.clone())
            })
    }
}

/// Printable form with the password masked, for learning mode
impl fmt::Display for ClientInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in &self.env {
            if key == PASSWORD_ENV {
                write!(f, "{}={} ", key, MASK)?;
            } else {
                write!(f, "{}={} ", key, shell_quote(value))?;
            }
        }
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.starts_with(PASSWORD_FLAG) {
                write!(f, " {}{}", PASSWORD_FLAG, MASK)?;
            } else {
                write!(f, " {}", shell_quote(arg))?;
            }
        }
        Ok(())
    }
}

/// Shell fragment that streams a dump file to stdout
///
/// Compressed dumps (`.sql.gz` anywhere in the name) go through `gunzip`.
pub fn dump_reader(file: &str) -> String {
    if file.contains(".sql.gz") {
        format!("gunzip -c {} | ", shell_quote(file))
    } else {
        format!("cat {} | ", shell_quote(file))
    }
}

/// Shell line importing a dump file into the connection's database
pub fn import_line(connection: &Connection, file: &str) -> String {
    let reader = dump_reader(file);
    match connection.driver {
        Driver::Mysql => format!(
            "{}mysql --user={} --password={} --host={} --port={} {}",
            reader,
            shell_quote(&connection.username),
            shell_quote(&connection.password),
            shell_quote(&connection.host),
            connection.port,
            shell_quote(&connection.database)
        ),
        Driver::Pgsql => format!(
            "{}PGPASSWORD={} psql -w -U {} -h {} -p {} -d {}",
            reader,
            shell_quote(&connection.password),
            shell_quote(&connection.username),
            shell_quote(&connection.host),
            connection.port,
            shell_quote(&connection.database)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mysql() -> Connection {
        Connection {
            database: "site".to_string(),
            username: "admin".to_string(),
            password: "s3cret".to_string(),
            host: "db".to_string(),
            ..Connection::default()
        }
    }

    fn pgsql() -> Connection {
        Connection {
            driver: Driver::Pgsql,
            port: 5432,
            ..mysql()
        }
    }

    #[test]
    fn test_mysql_query_invocation() {
        let invocation = ClientInvocation::query(&mysql(), "SELECT 1");
        assert_eq!(invocation.program, "mysql");
        assert!(invocation.args.contains(&"--password=s3cret".to_string()));
        assert_eq!(invocation.args.last().map(String::as_str), Some("SELECT 1"));
        assert!(invocation.env.is_empty());
    }

    #[test]
    fn test_pgsql_query_passes_password_through_env() {
        let invocation = ClientInvocation::query(&pgsql(), "SELECT 1");
        assert_eq!(invocation.program, "psql");
        assert_eq!(
            invocation.env,
            vec![("PGPASSWORD".to_string(), "s3cret".to_string())]
        );
        assert!(!invocation.args.iter().any(|a| a.contains("s3cret")));
    }

    #[test]
    fn test_display_masks_password() {
        let shown = ClientInvocation::query(&mysql(), "DROP DATABASE IF EXISTS site").to_string();
        assert!(!shown.contains("s3cret"));
        assert!(shown.contains("--password=******"));
        assert!(shown.contains("'DROP DATABASE IF EXISTS site'"));

        let shown = ClientInvocation::query(&pgsql(), "SELECT 1").to_string();
        assert!(shown.starts_with("PGPASSWORD=****** psql"));
    }

    #[test]
    fn test_display_masks_only_the_password() {
        let connection = Connection {
            database: "drupal".to_string(),
            username: "drupal".to_string(),
            password: "drupal".to_string(),
            ..Connection::default()
        };

        let shown =
            ClientInvocation::query(&connection, "CREATE DATABASE IF NOT EXISTS drupal").to_string();
        assert_eq!(
            shown,
            "mysql --user=drupal --password=****** --host=127.0.0.1 --port=3306 drupal -e \
             'CREATE DATABASE IF NOT EXISTS drupal'"
        );

        let pg = Connection {
            driver: Driver::Pgsql,
            ..connection
        };
        let shown = ClientInvocation::query(&pg, "SELECT 1").to_string();
        assert!(shown.starts_with("PGPASSWORD=****** psql -w -U drupal"));
        assert!(shown.contains("-d drupal"));
    }

    #[test]
    fn test_dump_reader() {
        assert_eq!(dump_reader("site.sql"), "cat site.sql | ");
        assert_eq!(dump_reader("site.sql.gz"), "gunzip -c site.sql.gz | ");
        assert_eq!(dump_reader("my dump.sql"), "cat 'my dump.sql' | ");
    }

    #[test]
    fn test_import_lines() {
        assert_eq!(
            import_line(&mysql(), "site.sql.gz"),
            "gunzip -c site.sql.gz | mysql --user=admin --password=s3cret --host=db --port=3306 site"
        );
        assert_eq!(
            import_line(&pgsql(), "site.sql"),
            "cat site.sql | PGPASSWORD=s3cret psql -w -U admin -h db -p 5432 -d site"
        );
    }
}
