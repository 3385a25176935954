//! # Console Agent
//!
//! Menu-driven course management for lecturers.
//!
//! Every operation returns to the main menu. Required fields are
//! re-prompted until non-blank; when editing, a blank answer keeps the
//! current value. Input that fails a grammar aborts the operation before
//! any request is sent.

use std::io::{BufRead, Write};
use std::sync::Arc;

use tracing::error;

use crate::course::{
    check_complete, validate_class_size, validate_course_id, validate_text, Course,
    CoursePayload, MarkupSanitizer, Sanitizer, TextField, ValidationError,
};

use super::errors::{ClientError, ClientResult};
use super::transport::{CourseTransport, Method, TransportResponse};

const MENU: &str = "
=================================================
University Course Listing Page (Lecturer Access)
=================================================
1. Add a new course
2. Browse selected course
3. Browse all course
4. Edit existing course
5. Delete existing course
6. Exit the course listing page
Select your choice: ";

/// Main menu entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddCourse,
    BrowseOne,
    BrowseAll,
    EditCourse,
    DeleteCourse,
    Exit,
}

impl MenuChoice {
    /// Parse a menu selection, `None` for anything but 1-6
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::AddCourse),
            "2" => Some(MenuChoice::BrowseOne),
            "3" => Some(MenuChoice::BrowseAll),
            "4" => Some(MenuChoice::EditCourse),
            "5" => Some(MenuChoice::DeleteCourse),
            "6" => Some(MenuChoice::Exit),
            _ => None,
        }
    }

    fn operation(&self) -> &'static str {
        match self {
            MenuChoice::AddCourse => "addCourse",
            MenuChoice::BrowseOne => "getCourse",
            MenuChoice::BrowseAll => "getAllCourses",
            MenuChoice::EditCourse => "updateCourse",
            MenuChoice::DeleteCourse => "deleteCourse",
            MenuChoice::Exit => "exit",
        }
    }
}

/// Console session over a transport, reading `input` and writing `output`
pub struct ConsoleAgent<T, R, W> {
    transport: T,
    sanitizer: Arc<dyn Sanitizer>,
    input: R,
    output: W,
}

impl<T: CourseTransport, R: BufRead, W: Write> ConsoleAgent<T, R, W> {
    pub fn new(transport: T, input: R, output: W) -> Self {
        Self {
            transport,
            sanitizer: Arc::new(MarkupSanitizer::new()),
            input,
            output,
        }
    }

    pub fn with_sanitizer(mut self, sanitizer: Arc<dyn Sanitizer>) -> Self {
        self.sanitizer = sanitizer;
        self
    }

    /// Consume the agent, returning its output sink
    pub fn into_output(self) -> W {
        self.output
    }

    /// Run the menu loop until Exit is chosen or input ends.
    ///
    /// Request failures are reported and the loop continues; only console
    /// I/O errors end the session early.
    pub fn run(&mut self) -> ClientResult<()> {
        loop {
            write!(self.output, "{}", MENU)?;
            writeln!(self.output)?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                break;
            };

            let Some(choice) = MenuChoice::parse(&line) else {
                writeln!(self.output, "Please select 1 to 6.")?;
                continue;
            };

            if choice == MenuChoice::Exit {
                writeln!(self.output, "Exiting the course listing page")?;
                break;
            }

            match self.dispatch(choice) {
                Ok(()) => {}
                Err(ClientError::Io(e)) => return Err(ClientError::Io(e)),
                Err(e) => {
                    error!(operation = choice.operation(), error = %e, "Request failed");
                    writeln!(self.output, "{}", e)?;
                }
            }
        }
        Ok(())
    }

    fn dispatch(&mut self, choice: MenuChoice) -> ClientResult<()> {
        match choice {
            MenuChoice::AddCourse => self.add_course(),
            MenuChoice::BrowseOne => self.browse_one(),
            MenuChoice::BrowseAll => self.browse_all(),
            MenuChoice::EditCourse => self.edit_course(),
            MenuChoice::DeleteCourse => self.delete_course(),
            MenuChoice::Exit => Ok(()),
        }
    }

    fn add_course(&mut self) -> ClientResult<()> {
        let op = MenuChoice::AddCourse.operation();

        let Some(raw) = self.prompt_required("Please provide the course ID.")? else {
            return Ok(());
        };
        let id = match validate_course_id(&raw, self.sanitizer.as_ref()) {
            Ok(id) => id,
            Err(e) => return self.reject(op, e),
        };

        let Some(raw) = self.prompt_required("Please provide the course title.")? else {
            return Ok(());
        };
        let title = match validate_text(TextField::Title, &raw, self.sanitizer.as_ref()) {
            Ok(title) => title,
            Err(e) => return self.reject(op, e),
        };

        let Some(raw) = self.prompt_required("Please provide the lecturer name of the course.")?
        else {
            return Ok(());
        };
        let lecturer = match validate_text(TextField::Lecturer, &raw, self.sanitizer.as_ref()) {
            Ok(lecturer) => lecturer,
            Err(e) => return self.reject(op, e),
        };

        let Some(raw) = self.prompt_required("Please provide expected class size.")? else {
            return Ok(());
        };
        let class_size = match validate_class_size(&raw, self.sanitizer.as_ref()) {
            Ok(size) => size,
            Err(e) => return self.reject(op, e),
        };

        let payload = CoursePayload {
            title,
            lecturer,
            class_size: i64::from(class_size),
        };
        let response = self.transport.send(Method::Post, Some(&id), Some(&payload))?;
        self.render(&response)
    }

    fn browse_one(&mut self) -> ClientResult<()> {
        let Some(raw) = self.prompt_required("Please provide the course ID you wish to browse.")?
        else {
            return Ok(());
        };
        let id = match validate_course_id(&raw, self.sanitizer.as_ref()) {
            Ok(id) => id,
            Err(e) => return self.reject(MenuChoice::BrowseOne.operation(), e),
        };

        let response = self.transport.send(Method::Get, Some(&id), None)?;
        self.render(&response)
    }

    fn browse_all(&mut self) -> ClientResult<()> {
        let response = self.transport.send(Method::Get, None, None)?;
        if !response.is_success() {
            return self.render(&response);
        }

        let courses: Vec<Course> = match serde_json::from_str(&response.body) {
            Ok(courses) => courses,
            Err(_) => return self.render(&response),
        };

        writeln!(self.output)?;
        writeln!(self.output, "Below is the list of available course.")?;
        for (i, course) in courses.iter().enumerate() {
            writeln!(
                self.output,
                "{}. Course ID: {}, Title: {}, Lecturer: {}, Class Size: {}",
                i + 1,
                course.id,
                course.title,
                course.lecturer,
                course.class_size
            )?;
        }
        Ok(())
    }

    fn edit_course(&mut self) -> ClientResult<()> {
        let op = MenuChoice::EditCourse.operation();

        let Some(raw) = self.prompt_required("Please provide the course ID.")? else {
            return Ok(());
        };
        let id = match validate_course_id(&raw, self.sanitizer.as_ref()) {
            Ok(id) => id,
            Err(e) => return self.reject(op, e),
        };

        let current = self.transport.send(Method::Get, Some(&id), None)?;
        let mut payload = if current.is_success() {
            self.render(&current)?;
            match serde_json::from_str::<Course>(&current.body) {
                Ok(course) => course.to_payload(),
                Err(e) => {
                    error!(operation = op, error = %e, "Unreadable course record");
                    writeln!(self.output, "Could not read course {}: {}", id, e)?;
                    return Ok(());
                }
            }
        } else if current.status == 404 {
            writeln!(
                self.output,
                "No existing course {}. All fields are required to create it.",
                id
            )?;
            CoursePayload::default()
        } else {
            return self.render(&current);
        };

        let Some(raw) = self.prompt_optional(
            "Please provide the course title. Press enter if there is no change.",
        )?
        else {
            return Ok(());
        };
        if !raw.trim().is_empty() {
            match validate_text(TextField::Title, &raw, self.sanitizer.as_ref()) {
                Ok(title) => payload.title = title,
                Err(e) => return self.reject(op, e),
            }
        }

        let Some(raw) = self.prompt_optional(
            "Please provide the lecturer name of the course. Press enter if there is no change.",
        )?
        else {
            return Ok(());
        };
        if !raw.trim().is_empty() {
            match validate_text(TextField::Lecturer, &raw, self.sanitizer.as_ref()) {
                Ok(lecturer) => payload.lecturer = lecturer,
                Err(e) => return self.reject(op, e),
            }
        }

        let Some(raw) = self.prompt_optional(
            "Please provide expected class size. Press enter if there is no change.",
        )?
        else {
            return Ok(());
        };
        if !raw.trim().is_empty() {
            match validate_class_size(&raw, self.sanitizer.as_ref()) {
                Ok(size) => payload.class_size = i64::from(size),
                Err(e) => return self.reject(op, e),
            }
        }

        if let Err(e) = check_complete(&payload) {
            return self.reject(op, e);
        }

        let response = self.transport.send(Method::Put, Some(&id), Some(&payload))?;
        self.render(&response)
    }

    fn delete_course(&mut self) -> ClientResult<()> {
        let Some(raw) = self.prompt_required("Please provide the course ID you wish to delete.")?
        else {
            return Ok(());
        };
        let id = match validate_course_id(&raw, self.sanitizer.as_ref()) {
            Ok(id) => id,
            Err(e) => return self.reject(MenuChoice::DeleteCourse.operation(), e),
        };

        let response = self.transport.send(Method::Delete, Some(&id), None)?;
        self.render(&response)
    }

    /// Report a validation failure and abandon the operation
    fn reject(&mut self, operation: &'static str, err: ValidationError) -> ClientResult<()> {
        error!(operation = operation, "Incorrect input format detected: {}", err);
        writeln!(self.output, "Incorrect input format: {}", err)?;
        Ok(())
    }

    fn render(&mut self, response: &TransportResponse) -> ClientResult<()> {
        writeln!(self.output, "{}", response.status)?;
        writeln!(self.output, "{}", response.body)?;
        Ok(())
    }

    /// Prompt until a non-blank line arrives. `None` when input ends.
    fn prompt_required(&mut self, prompt: &str) -> ClientResult<Option<String>> {
        loop {
            writeln!(self.output, "{}", prompt)?;
            self.output.flush()?;
            match self.read_line()? {
                None => return Ok(None),
                Some(line) if line.trim().is_empty() => continue,
                Some(line) => return Ok(Some(line)),
            }
        }
    }

    /// Prompt once; a blank line is a valid answer. `None` when input ends.
    fn prompt_optional(&mut self, prompt: &str) -> ClientResult<Option<String>> {
        writeln!(self.output, "{}", prompt)?;
        self.output.flush()?;
        self.read_line()
    }

    fn read_line(&mut self) -> ClientResult<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(|c| c == '\n' || c == '\r').to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    type Sent = (Method, Option<String>, Option<CoursePayload>);

    /// Transport replaying canned responses and recording requests
    #[derive(Default)]
    struct ScriptedTransport {
        responses: RefCell<VecDeque<TransportResponse>>,
        sent: RefCell<Vec<Sent>>,
    }

    impl ScriptedTransport {
        fn respond(self, status: u16, body: &str) -> Self {
            self.responses.borrow_mut().push_back(TransportResponse {
                status,
                body: body.to_string(),
            });
            self
        }
    }

    impl CourseTransport for &ScriptedTransport {
        fn send(
            &self,
            method: Method,
            course_id: Option<&str>,
            payload: Option<&CoursePayload>,
        ) -> ClientResult<TransportResponse> {
            self.sent
                .borrow_mut()
                .push((method, course_id.map(String::from), payload.cloned()));
            Ok(self
                .responses
                .borrow_mut()
                .pop_front()
                .unwrap_or(TransportResponse {
                    status: 200,
                    body: String::new(),
                }))
        }
    }

    fn run_session(transport: &ScriptedTransport, input: &str) -> String {
        let mut agent = ConsoleAgent::new(transport, input.as_bytes(), Vec::new());
        agent.run().unwrap();
        String::from_utf8(agent.into_output()).unwrap()
    }

    #[test]
    fn test_menu_choice_parse() {
        assert_eq!(MenuChoice::parse("1"), Some(MenuChoice::AddCourse));
        assert_eq!(MenuChoice::parse(" 6 "), Some(MenuChoice::Exit));
        assert_eq!(MenuChoice::parse("7"), None);
        assert_eq!(MenuChoice::parse("exit"), None);
    }

    #[test]
    fn test_invalid_choice_then_exit() {
        let transport = ScriptedTransport::default();
        let output = run_session(&transport, "9\n6\n");

        assert!(output.contains("Please select 1 to 6."));
        assert!(output.contains("Exiting the course listing page"));
        assert!(transport.sent.borrow().is_empty());
    }

    #[test]
    fn test_end_of_input_ends_session() {
        let transport = ScriptedTransport::default();
        let output = run_session(&transport, "");
        assert!(output.contains("1. Add a new course"));
    }

    #[test]
    fn test_add_course_sends_validated_payload() {
        let transport = ScriptedTransport::default()
            .respond(201, r#"{"message":"Course added: CSE1001","code":201}"#);
        let output = run_session(
            &transport,
            "1\n\n CSE1001 \nIntro to Systems\nJane Doe\n50\n6\n",
        );

        let sent = transport.sent.borrow();
        assert_eq!(sent.len(), 1);
        let (method, id, payload) = &sent[0];
        assert_eq!(*method, Method::Post);
        assert_eq!(id.as_deref(), Some("CSE1001"));
        assert_eq!(
            payload.as_ref().unwrap(),
            &CoursePayload {
                title: "Intro to Systems".to_string(),
                lecturer: "Jane Doe".to_string(),
                class_size: 50,
            }
        );
        assert!(output.contains("201"));
        assert!(output.contains("Course added: CSE1001"));
    }

    #[test]
    fn test_add_course_required_fields_reprompt() {
        let transport = ScriptedTransport::default();
        let output = run_session(&transport, "1\n\n\nCSE1001\n\nIntro\nJane Doe\n50\n6\n");

        assert_eq!(output.matches("Please provide the course ID.").count(), 3);
        assert_eq!(output.matches("Please provide the course title.").count(), 2);
        assert_eq!(transport.sent.borrow().len(), 1);
    }

    #[test]
    fn test_add_course_invalid_input_sends_nothing() {
        for input in [
            "1\ncse1001\n6\n",
            "1\nCSE1001\nIntro!\n6\n",
            "1\nCSE1001\nIntro\nJ\n6\n",
            "1\nCSE1001\nIntro\nJane Doe\n0\n6\n",
            "1\nCSE1001\nIntro\nJane Doe\n12345\n6\n",
        ] {
            let transport = ScriptedTransport::default();
            let output = run_session(&transport, input);

            assert!(output.contains("Incorrect input format"), "{:?}", input);
            assert!(transport.sent.borrow().is_empty(), "{:?}", input);
            assert!(output.contains("Exiting the course listing page"));
        }
    }

    #[test]
    fn test_browse_one_validates_before_request() {
        let transport = ScriptedTransport::default();
        run_session(&transport, "2\nCSE-1001\n6\n");
        assert!(transport.sent.borrow().is_empty());

        let transport = ScriptedTransport::default().respond(404, r#"{"error":"No course found","code":404}"#);
        let output = run_session(&transport, "2\nCSE1001\n6\n");
        assert_eq!(transport.sent.borrow()[0].0, Method::Get);
        assert!(output.contains("404"));
        assert!(output.contains("No course found"));
    }

    #[test]
    fn test_browse_all_lists_courses() {
        let body = serde_json::to_string(&vec![
            Course::new("CSE1001", "Intro to Systems", "Jane Doe", 50),
            Course::new("MTH2000", "Calculus", "Ann Lee", 30),
        ])
        .unwrap();
        let transport = ScriptedTransport::default().respond(200, &body);
        let output = run_session(&transport, "3\n6\n");

        assert!(output.contains("Below is the list of available course."));
        assert!(output.contains(
            "1. Course ID: CSE1001, Title: Intro to Systems, Lecturer: Jane Doe, Class Size: 50"
        ));
        assert!(output
            .contains("2. Course ID: MTH2000, Title: Calculus, Lecturer: Ann Lee, Class Size: 30"));
    }

    #[test]
    fn test_edit_keeps_blank_fields() {
        let current = serde_json::to_string(&Course::new(
            "CSE1001",
            "Intro to Systems",
            "Jane Doe",
            50,
        ))
        .unwrap();
        let transport = ScriptedTransport::default()
            .respond(200, &current)
            .respond(202, r#"{"message":"Course updated: CSE1001","code":202}"#);
        let output = run_session(&transport, "4\nCSE1001\n\nAnn Lee\n\n6\n");

        let sent = transport.sent.borrow();
        assert_eq!(sent.len(), 2);
        let (method, _, payload) = &sent[1];
        assert_eq!(*method, Method::Put);
        assert_eq!(
            payload.as_ref().unwrap(),
            &CoursePayload {
                title: "Intro to Systems".to_string(),
                lecturer: "Ann Lee".to_string(),
                class_size: 50,
            }
        );
        assert!(output.contains("Course updated: CSE1001"));
    }

    #[test]
    fn test_edit_invalid_field_aborts_before_put() {
        let current =
            serde_json::to_string(&Course::new("CSE1001", "Intro to Systems", "Jane Doe", 50))
                .unwrap();
        let transport = ScriptedTransport::default().respond(200, &current);
        let output = run_session(&transport, "4\nCSE1001\n\n\n-4\n6\n");

        assert!(output.contains("Incorrect input format: Incorrect format for Class Size"));
        let sent = transport.sent.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, Method::Get);
    }

    #[test]
    fn test_edit_unreadable_record_is_reported() {
        let transport = ScriptedTransport::default().respond(200, "<html>");
        let output = run_session(&transport, "4\nCSE1001\n6\n");

        assert!(output.contains("Could not read course CSE1001"));
        assert_eq!(transport.sent.borrow().len(), 1);
        assert!(output.contains("Exiting the course listing page"));
    }

    #[test]
    fn test_edit_absent_course_requires_all_fields() {
        let transport = ScriptedTransport::default().respond(404, "");
        let output = run_session(&transport, "4\nCSE1001\nIntro\n\n\n6\n");

        assert!(output.contains("All fields are required"));
        assert!(output.contains("Information supplied not complete"));
        assert_eq!(transport.sent.borrow().len(), 1);
    }

    #[test]
    fn test_delete_course() {
        let transport = ScriptedTransport::default()
            .respond(202, r#"{"message":"Course deleted: CSE1001","code":202}"#);
        let output = run_session(&transport, "5\nCSE1001\n6\n");

        let sent = transport.sent.borrow();
        assert_eq!(sent[0].0, Method::Delete);
        assert_eq!(sent[0].1.as_deref(), Some("CSE1001"));
        assert!(output.contains("202"));
    }

    struct UpperSanitizer;

    impl Sanitizer for UpperSanitizer {
        fn sanitize(&self, input: &str) -> String {
            input.to_ascii_uppercase()
        }
    }

    #[test]
    fn test_custom_sanitizer() {
        let transport = ScriptedTransport::default();
        let mut agent = ConsoleAgent::new(&transport, "5\ncse1001\n6\n".as_bytes(), Vec::new())
            .with_sanitizer(Arc::new(UpperSanitizer));
        agent.run().unwrap();

        assert_eq!(transport.sent.borrow()[0].1.as_deref(), Some("CSE1001"));
    }
}
