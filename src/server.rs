use actix_cors::Cors;
use actix_web::http::StatusCode;
use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use chrono::{Local, NaiveDateTime};
use serde::Deserialize;
use serde_json::json;
use std::sync::{Mutex, MutexGuard};
use tracing::{error, info, warn};

use crate::acciones::{anular_interrupcion, leer_historial, registrar_interrupcion, NuevaInterrupcion};
use crate::algorithm::{calcular_cobertura, filter_interruptions};
use crate::config::Configuracion;
use crate::error::{ErrorAccion, ErrorAlmacen, ErrorCalculo};
use crate::excel::{hojas, leer_snapshot, AlmacenTabular, LibroExcel};

/// Estado compartido: el almacén detrás de un `Mutex`. Cada petición relee
/// las hojas que necesita; no hay caché entre peticiones.
pub struct AppState {
    almacen: Mutex<Box<dyn AlmacenTabular + Send>>,
}

impl AppState {
    pub fn new(almacen: Box<dyn AlmacenTabular + Send>) -> web::Data<AppState> {
        web::Data::new(AppState { almacen: Mutex::new(almacen) })
    }

    fn almacen(&self) -> Result<MutexGuard<'_, Box<dyn AlmacenTabular + Send>>, HttpResponse> {
        self.almacen.lock().map_err(|_| {
            error!("mutex del almacén envenenado");
            respuesta_error(StatusCode::INTERNAL_SERVER_ERROR, "almacén no disponible", "configuracion")
        })
    }
}

fn ahora() -> NaiveDateTime {
    Local::now().naive_local()
}

fn respuesta_error(status: StatusCode, msg: &str, tipo: &str) -> HttpResponse {
    HttpResponse::build(status).json(json!({"error": msg, "tipo": tipo}))
}

fn error_almacen(e: &ErrorAlmacen) -> HttpResponse {
    error!(error = %e, "fallo del almacén");
    respuesta_error(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string(), "configuracion")
}

fn error_calculo(e: &ErrorCalculo) -> HttpResponse {
    let status = match e {
        ErrorCalculo::Configuracion(inner) => return error_almacen(inner),
        ErrorCalculo::CursoNoEncontrado(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::UNPROCESSABLE_ENTITY,
    };
    warn!(error = %e, "cálculo sin reporte");
    respuesta_error(status, &e.to_string(), "datos")
}

fn error_accion(e: &ErrorAccion) -> HttpResponse {
    let status = match e {
        ErrorAccion::Almacen(inner) => return error_almacen(inner),
        ErrorAccion::Validacion(_) => StatusCode::BAD_REQUEST,
        ErrorAccion::NoEncontrada(_) => StatusCode::NOT_FOUND,
        ErrorAccion::YaCancelada(_) => StatusCode::CONFLICT,
    };
    warn!(error = %e, "acción rechazada");
    respuesta_error(status, &e.to_string(), "datos")
}

/// GET /health
/// Abre el almacén y verifica que estén las hojas esperadas.
async fn health_handler(state: web::Data<AppState>) -> impl Responder {
    let almacen = match state.almacen() {
        Ok(a) => a,
        Err(resp) => return resp,
    };
    match almacen.hojas() {
        Ok(presentes) => {
            let faltantes: Vec<&str> = hojas::REQUERIDAS
                .iter()
                .copied()
                .filter(|h| !presentes.iter().any(|p| p == h))
                .collect();
            HttpResponse::Ok().json(json!({
                "ok": faltantes.is_empty(),
                "hojas": presentes,
                "faltantes": faltantes,
            }))
        }
        Err(e) => error_almacen(&e),
    }
}

/// GET /cursos
async fn cursos_handler(state: web::Data<AppState>) -> impl Responder {
    let almacen = match state.almacen() {
        Ok(a) => a,
        Err(resp) => return resp,
    };
    match leer_snapshot(&**almacen) {
        Ok(snap) => HttpResponse::Ok().json(json!({"cursos": snap.cursos, "advertencias": snap.advertencias})),
        Err(e) => error_almacen(&e),
    }
}

#[derive(Deserialize)]
struct CursoQuery {
    curso: Option<String>,
}

/// GET /cobertura?curso=ID
async fn cobertura_handler(state: web::Data<AppState>, q: web::Query<CursoQuery>) -> impl Responder {
    let Some(curso) = q.curso.as_deref().map(str::trim).filter(|c| !c.is_empty()) else {
        return respuesta_error(StatusCode::BAD_REQUEST, "falta el parámetro 'curso'", "datos");
    };
    let almacen = match state.almacen() {
        Ok(a) => a,
        Err(resp) => return resp,
    };
    let snap = match leer_snapshot(&**almacen) {
        Ok(s) => s,
        Err(e) => return error_almacen(&e),
    };
    drop(almacen);

    match calcular_cobertura(&snap, curso) {
        Ok(reporte) => HttpResponse::Ok().json(reporte),
        Err(e) => error_calculo(&e),
    }
}

/// GET /interrupciones[?curso=ID]
async fn interrupciones_handler(state: web::Data<AppState>, q: web::Query<CursoQuery>) -> impl Responder {
    let almacen = match state.almacen() {
        Ok(a) => a,
        Err(resp) => return resp,
    };
    let snap = match leer_snapshot(&**almacen) {
        Ok(s) => s,
        Err(e) => return error_almacen(&e),
    };
    match q.curso.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
        Some(curso) => {
            let aplicables = filter_interruptions(&snap.interrupciones, curso);
            HttpResponse::Ok().json(json!({"curso": curso, "interrupciones": aplicables}))
        }
        None => HttpResponse::Ok().json(json!({"interrupciones": snap.interrupciones, "advertencias": snap.advertencias})),
    }
}

#[derive(Deserialize)]
struct CrearRequest {
    usuario: String,
    #[serde(flatten)]
    interrupcion: NuevaInterrupcion,
}

/// POST /interrupciones
async fn crear_interrupcion_handler(state: web::Data<AppState>, body: web::Json<CrearRequest>) -> impl Responder {
    let CrearRequest { usuario, interrupcion } = body.into_inner();
    let mut almacen = match state.almacen() {
        Ok(a) => a,
        Err(resp) => return resp,
    };
    match registrar_interrupcion(&mut **almacen, interrupcion, &usuario, ahora()) {
        Ok(res) => HttpResponse::Created().json(res),
        Err(e) => error_accion(&e),
    }
}

#[derive(Deserialize)]
struct AnularRequest {
    usuario: String,
    justificacion: String,
}

/// POST /interrupciones/{id}/anular
async fn anular_interrupcion_handler(
    state: web::Data<AppState>,
    id: web::Path<String>,
    body: web::Json<AnularRequest>,
) -> impl Responder {
    let mut almacen = match state.almacen() {
        Ok(a) => a,
        Err(resp) => return resp,
    };
    match anular_interrupcion(&mut **almacen, &id, &body.usuario, &body.justificacion, ahora()) {
        Ok(res) => HttpResponse::Ok().json(res),
        Err(e) => error_accion(&e),
    }
}

/// GET /historial
async fn historial_handler(state: web::Data<AppState>) -> impl Responder {
    let almacen = match state.almacen() {
        Ok(a) => a,
        Err(resp) => return resp,
    };
    match leer_historial(&**almacen) {
        Ok(registros) => HttpResponse::Ok().json(json!({"historial": registros})),
        Err(e) => error_almacen(&e),
    }
}

async fn help_handler() -> impl Responder {
    let ejemplo_crear = json!({
        "usuario": "jefe.estudios",
        "nombre": "Ejercicio Naval",
        "fecha_inicio": "15/04/2026",
        "fecha_fin": "17/04/2026",
        "tipo": "EJERCICIO",
        "alcance": {"tipo": "ESPECIFICO", "curso": "C-101"},
        "justificacion": "Planificado por el Estado Mayor"
    });
    HttpResponse::Ok().json(json!({
        "description": "SPAN: simula el calendario de un curso (fines de semana e interrupciones) y estima la cobertura de horas pedagógicas.",
        "rutas": {
            "GET /health": "verifica el libro y sus hojas",
            "GET /cursos": "lista de cursos",
            "GET /cobertura?curso=ID": "reporte de cobertura del curso",
            "GET /interrupciones[?curso=ID]": "interrupciones normalizadas (todas o las que aplican al curso)",
            "POST /interrupciones": "crea una interrupción ACTIVA",
            "POST /interrupciones/{id}/anular": "cancela una interrupción (body: usuario, justificacion)",
            "GET /historial": "historial de cambios"
        },
        "post_example": ejemplo_crear,
        "note": "Alcance GLOBAL: {\"tipo\": \"GLOBAL\"}. Las fechas aceptan DD/MM/AAAA o AAAA-MM-DD."
    }))
}

/// Registra las rutas. Usado por `run_server` y por las pruebas.
pub fn configurar(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_handler))
        .route("/cursos", web::get().to(cursos_handler))
        .route("/cobertura", web::get().to(cobertura_handler))
        .route("/interrupciones", web::get().to(interrupciones_handler))
        .route("/interrupciones", web::post().to(crear_interrupcion_handler))
        .route("/interrupciones/{id}/anular", web::post().to(anular_interrupcion_handler))
        .route("/historial", web::get().to(historial_handler))
        .route("/help", web::get().to(help_handler));
}

pub async fn run_server(config: Configuracion) -> std::io::Result<()> {
    info!(libro = %config.libro.display(), bind = %config.bind, "iniciando servidor SPAN");
    let state = AppState::new(Box::new(LibroExcel::new(&config.libro)));
    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .app_data(state.clone())
            .configure(configurar)
    })
    .bind(&config.bind)?
    .run()
    .await
}
