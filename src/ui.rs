use crate::page::PageSnapshot;
use crate::tabs::Tab;
use maud::{DOCTYPE, Markup, PreEscaped, html};

const SORT_OPTIONS: [(&str, &str); 6] = [
    ("name-asc", "Name (A-Z)"),
    ("name-desc", "Name (Z-A)"),
    ("roll_number-asc", "Roll Number (Asc)"),
    ("roll_number-desc", "Roll Number (Desc)"),
    ("class-asc", "Class (A-Z)"),
    ("class-desc", "Class (Z-A)"),
];

fn display(open: bool) -> &'static str {
    if open { "display: block" } else { "display: none" }
}

/// The full page with the current snapshot already filled in. The script at
/// the bottom forwards interactions to `/ui/events` and applies the snapshot
/// it gets back.
pub fn render_index(snapshot: &PageSnapshot) -> Markup {
    let form = &snapshot.add_student.form;
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { "Student Attendance System" }
                style { (PreEscaped(CSS)) }
            }
            body {
                div.container {
                    header {
                        h1 { "📚 Student Attendance System" }
                        p.subtitle { "Track daily attendance and review each student's record." }
                    }

                    div.stats-container {
                        div.stat-card {
                            h3 { "Total Students" }
                            p #totalStudents { (snapshot.stats.total_students) }
                        }
                        div.stat-card {
                            h3 { "Present Today" }
                            p #presentToday { (snapshot.stats.present_today) }
                        }
                        div.stat-card {
                            h3 { "Absent Today" }
                            p #absentToday { (snapshot.stats.absent_today) }
                        }
                    }

                    div.tabs {
                        @for tab in Tab::ALL {
                            button.tab-btn.active[snapshot.active_tab == tab] type="button" data-tab=(tab.as_str()) {
                                (tab.label())
                            }
                        }
                    }

                    div #students .tab-content.active[snapshot.active_tab == Tab::Students] {
                        div.controls {
                            input #searchInput type="text"
                                placeholder="Search by name, roll number, or class..."
                                value=(snapshot.search);
                            select #sortSelect {
                                @for (value, label) in SORT_OPTIONS {
                                    option value=(value) selected[snapshot.sort == value] { (label) }
                                }
                            }
                            button.btn.btn-primary #addStudentBtn type="button" { "+ Add Student" }
                        }
                        div #studentsList .students-grid { (PreEscaped(&snapshot.students_html)) }
                    }

                    div #attendance .tab-content.active[snapshot.active_tab == Tab::Attendance] {
                        div.controls {
                            label for="attendanceDate" { "Date:" }
                            input #attendanceDate type="date"
                                value=(snapshot.date.format("%Y-%m-%d").to_string());
                        }
                        div #attendanceList { (PreEscaped(&snapshot.attendance_html)) }
                    }

                    div #reports .tab-content.active[snapshot.active_tab == Tab::Reports] {
                        div #reportsList .reports-grid { (PreEscaped(&snapshot.reports_html)) }
                    }
                }

                div #addStudentModal .modal data-overlay="add_student" style=(display(snapshot.add_student.open)) {
                    div.modal-content {
                        span.close data-close="add_student" { "×" }
                        h2 { "Add New Student" }
                        form #addStudentForm {
                            input type="text" name="name" placeholder="Full Name" required value=(form.name);
                            input type="text" name="roll_number" placeholder="Roll Number" required value=(form.roll_number);
                            input type="text" name="class" placeholder="Class" required value=(form.class_name);
                            input type="email" name="email" placeholder="Email" required value=(form.email);
                            button.btn.btn-primary type="submit" { "Add Student" }
                        }
                    }
                }

                div #graphModal .modal data-overlay="graph" style=(display(snapshot.graph.open)) {
                    div.modal-content.modal-large {
                        span.close data-close="graph" { "×" }
                        h2 #graphTitle { (snapshot.graph.title) }
                        div #graphContainer { (PreEscaped(&snapshot.graph.body_html)) }
                    }
                }

                script { (PreEscaped(SCRIPT)) }
            }
        }
    }
}

const CSS: &str = r#"
    :root {
      --bg: #f0f2f8;
      --ink: #2b2a28;
      --primary: #667eea;
      --primary-2: #764ba2;
      --success: #4caf50;
      --danger: #f44336;
      --card: #ffffff;
      --shadow: 0 10px 30px rgba(47, 72, 88, 0.12);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(135deg, var(--primary), var(--primary-2));
      color: var(--ink);
      font-family: "Segoe UI", "Trebuchet MS", sans-serif;
      padding: 32px 18px 48px;
    }

    .container {
      width: min(1100px, 100%);
      margin: 0 auto;
      background: var(--bg);
      border-radius: 24px;
      box-shadow: var(--shadow);
      padding: 32px;
    }

    header h1 {
      margin: 0;
      font-size: clamp(1.8rem, 4vw, 2.4rem);
    }

    .subtitle {
      margin: 6px 0 0;
      color: #5f5c57;
    }

    .stats-container {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
      gap: 16px;
      margin: 24px 0;
    }

    .stat-card,
    .student-card,
    .report-card,
    .attendance-item {
      background: var(--card);
      border-radius: 16px;
      padding: 18px;
      box-shadow: 0 4px 12px rgba(0, 0, 0, 0.06);
    }

    .stat-card h3 {
      margin: 0;
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.1em;
      color: #8b857d;
    }

    .stat-card p {
      margin: 8px 0 0;
      font-size: 2rem;
      font-weight: 600;
      color: var(--primary);
    }

    .tabs {
      display: flex;
      gap: 8px;
      margin-bottom: 20px;
    }

    .tab-btn {
      border: none;
      border-radius: 999px;
      padding: 10px 18px;
      font-weight: 600;
      background: transparent;
      color: #6b645d;
      cursor: pointer;
    }

    .tab-btn.active {
      background: var(--primary);
      color: white;
    }

    .tab-content {
      display: none;
    }

    .tab-content.active {
      display: block;
    }

    .controls {
      display: flex;
      flex-wrap: wrap;
      gap: 12px;
      align-items: center;
      margin-bottom: 18px;
    }

    .controls input,
    .controls select,
    .modal-content input {
      padding: 10px 12px;
      border-radius: 10px;
      border: 1px solid #d6d3cf;
      font-size: 0.95rem;
    }

    #searchInput {
      flex: 1;
      min-width: 220px;
    }

    .students-grid,
    .reports-grid {
      display: grid;
      grid-template-columns: repeat(auto-fill, minmax(240px, 1fr));
      gap: 16px;
    }

    .student-card h3,
    .report-card h3 {
      margin-top: 0;
    }

    .report-card {
      cursor: pointer;
      transition: transform 150ms ease;
    }

    .report-card:hover {
      transform: translateY(-3px);
    }

    .attendance-item {
      display: grid;
      grid-template-columns: 1fr auto auto;
      gap: 16px;
      align-items: center;
      margin-bottom: 12px;
    }

    .attendance-info h4 {
      margin: 0;
    }

    .attendance-info p {
      margin: 4px 0 0;
      color: #8b857d;
    }

    .btn {
      border: none;
      border-radius: 10px;
      padding: 10px 16px;
      font-weight: 600;
      cursor: pointer;
      color: white;
    }

    .btn-primary {
      background: var(--primary);
    }

    .btn-success {
      background: var(--success);
    }

    .placeholder {
      text-align: center;
      color: #999;
    }

    .load-error {
      text-align: center;
      color: var(--danger);
    }

    .modal {
      position: fixed;
      inset: 0;
      background: rgba(0, 0, 0, 0.5);
      z-index: 10;
    }

    .modal-content {
      position: relative;
      background: white;
      width: min(480px, 92%);
      margin: 8vh auto;
      border-radius: 18px;
      padding: 28px;
      display: grid;
      gap: 12px;
    }

    .modal-content form {
      display: grid;
      gap: 12px;
    }

    .modal-large {
      width: min(960px, 94%);
    }

    .modal-large img {
      width: 100%;
      border-radius: 12px;
    }

    .close {
      position: absolute;
      top: 12px;
      right: 18px;
      font-size: 1.6rem;
      cursor: pointer;
    }

    .attendance-stats {
      display: grid;
      grid-template-columns: repeat(4, 1fr);
      gap: 12px;
    }

    .stat-box {
      background: var(--bg);
      border-radius: 12px;
      padding: 12px;
      text-align: center;
    }

    .stat-box h4 {
      margin: 0;
      font-size: 1.5rem;
      color: var(--primary);
    }

    .stat-box p {
      margin: 4px 0 0;
      color: #8b857d;
    }
"#;

const SCRIPT: &str = r#"
    const byId = (id) => document.getElementById(id);
    const addModal = byId('addStudentModal');
    const graphModal = byId('graphModal');
    const addForm = byId('addStudentForm');
    const rendered = {
      studentsList: byId('studentsList').innerHTML,
      attendanceList: byId('attendanceList').innerHTML,
      reportsList: byId('reportsList').innerHTML,
      graphContainer: byId('graphContainer').innerHTML
    };

    const patch = (id, html) => {
      if (rendered[id] === html) {
        return;
      }
      rendered[id] = html;
      byId(id).innerHTML = html;
    };

    const apply = (snapshot) => {
      document.querySelectorAll('.tab-btn').forEach((button) => {
        button.classList.toggle('active', button.dataset.tab === snapshot.active_tab);
      });
      document.querySelectorAll('.tab-content').forEach((panel) => {
        panel.classList.toggle('active', panel.id === snapshot.active_tab);
      });

      byId('totalStudents').textContent = snapshot.stats.total_students;
      byId('presentToday').textContent = snapshot.stats.present_today;
      byId('absentToday').textContent = snapshot.stats.absent_today;

      patch('studentsList', snapshot.students_html);
      patch('attendanceList', snapshot.attendance_html);
      patch('reportsList', snapshot.reports_html);
      patch('graphContainer', snapshot.graph.body_html);
      byId('graphTitle').textContent = snapshot.graph.title;

      addModal.style.display = snapshot.add_student.open ? 'block' : 'none';
      if (!snapshot.add_student.open) {
        addForm.reset();
      }
      graphModal.style.display = snapshot.graph.open ? 'block' : 'none';

      snapshot.notices.forEach((notice) => alert(notice.message));
    };

    const send = async (event) => {
      try {
        const res = await fetch('/ui/events', {
          method: 'POST',
          headers: { 'content-type': 'application/json' },
          body: JSON.stringify(event)
        });
        if (!res.ok) {
          const msg = await res.text();
          throw new Error(msg || 'Request failed');
        }
        apply(await res.json());
      } catch (err) {
        console.error('Error:', err);
        alert(err.message);
      }
    };

    document.querySelectorAll('.tab-btn').forEach((button) => {
      button.addEventListener('click', () => send({ type: 'tab_clicked', tab: button.dataset.tab }));
    });

    byId('searchInput').addEventListener('input', (event) => {
      send({ type: 'search_input', text: event.target.value });
    });
    byId('sortSelect').addEventListener('change', (event) => {
      send({ type: 'sort_changed', value: event.target.value });
    });
    byId('attendanceDate').addEventListener('change', (event) => {
      send({ type: 'date_changed', date: event.target.value });
    });

    byId('addStudentBtn').addEventListener('click', () => send({ type: 'show_add_student' }));
    addForm.addEventListener('submit', (event) => {
      event.preventDefault();
      const data = new FormData(addForm);
      send({
        type: 'submit_add_student',
        form: {
          name: data.get('name'),
          roll_number: data.get('roll_number'),
          class: data.get('class'),
          email: data.get('email')
        }
      });
    });

    document.addEventListener('click', (event) => {
      const close = event.target.closest('[data-close]');
      if (close) {
        send({ type: close.dataset.close === 'graph' ? 'close_graph' : 'close_add_student' });
        return;
      }
      if (event.target.classList.contains('modal')) {
        send({ type: 'overlay_clicked', overlay: event.target.dataset.overlay, target: 'backdrop' });
        return;
      }
      const action = event.target.closest('[data-action]');
      if (!action) {
        return;
      }
      const studentId = Number(action.dataset.studentId);
      if (action.dataset.action === 'view-attendance') {
        send({ type: 'view_attendance', student_id: studentId, name: action.dataset.studentName });
      } else if (action.dataset.action === 'view-graph') {
        send({ type: 'view_graph', student_id: studentId, name: action.dataset.studentName });
      } else if (action.dataset.action === 'mark-attendance') {
        send({ type: 'mark_attendance', student_id: studentId, status: byId(`status-${studentId}`).value });
      }
    });
"#;
